use crate::constants::DEFAULT_TRENDLINE_LINE_WIDTH;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use vegaforge_common::error::{Result, VegaForgeError};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrendlineOptions {
    pub method: Option<String>,
    pub line_type: Option<String>,
    pub line_width: Option<f64>,
    /// Static color override; defaults to the parent mark's color
    pub color: Option<String>,
    pub opacity: Option<f64>,
    pub display_on_hover: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendlineSpecOptions {
    pub name: String,
    pub method: TrendlineMethod,
    pub line_dash: Vec<u32>,
    pub line_width: f64,
    pub color: Option<String>,
    pub opacity: f64,
    pub display_on_hover: bool,
}

impl TrendlineOptions {
    /// Trendline names derive from the parent mark so every generated data
    /// source and signal stays unique per mark.
    pub fn normalize(&self, parent_name: &str, index: usize) -> TrendlineSpecOptions {
        let method = match &self.method {
            Some(raw) => TrendlineMethod::from_str(raw).unwrap_or_else(|_| {
                log::error!("unknown trendline method '{raw}', falling back to linear");
                TrendlineMethod::Linear
            }),
            None => TrendlineMethod::Linear,
        };
        let line_dash = match self.line_type.as_deref() {
            Some("solid") => vec![],
            Some("dotted") => vec![2, 3],
            None | Some("dashed") => vec![7, 4],
            Some(other) => {
                log::error!("unknown trendline lineType '{other}', falling back to dashed");
                vec![7, 4]
            }
        };
        TrendlineSpecOptions {
            name: format!("{parent_name}Trendline{index}"),
            method,
            line_dash,
            line_width: self.line_width.unwrap_or(DEFAULT_TRENDLINE_LINE_WIDTH),
            color: self.color.clone(),
            opacity: self.opacity.unwrap_or(1.0),
            display_on_hover: self.display_on_hover.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendlineMethod {
    Average,
    Median,
    Linear,
    Logarithmic,
    Exponential,
    Power,
    Quadratic,
    Polynomial(u32),
    MovingAverage(u32),
}

lazy_static! {
    static ref POLYNOMIAL_RE: Regex = Regex::new(r"^polynomial-(\d+)$").unwrap();
    static ref MOVING_AVERAGE_RE: Regex = Regex::new(r"^movingAverage-(\d+)$").unwrap();
}

impl FromStr for TrendlineMethod {
    type Err = VegaForgeError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(caps) = POLYNOMIAL_RE.captures(s) {
            let order: u32 = caps[1]
                .parse()
                .map_err(|_| VegaForgeError::invalid_parameter("polynomial order overflow"))?;
            return Ok(TrendlineMethod::Polynomial(order));
        }
        if let Some(caps) = MOVING_AVERAGE_RE.captures(s) {
            let width: u32 = caps[1]
                .parse()
                .map_err(|_| VegaForgeError::invalid_parameter("moving average width overflow"))?;
            return Ok(TrendlineMethod::MovingAverage(width));
        }
        match s {
            "average" => Ok(TrendlineMethod::Average),
            "median" => Ok(TrendlineMethod::Median),
            "linear" => Ok(TrendlineMethod::Linear),
            "logarithmic" => Ok(TrendlineMethod::Logarithmic),
            "exponential" => Ok(TrendlineMethod::Exponential),
            "power" => Ok(TrendlineMethod::Power),
            "quadratic" => Ok(TrendlineMethod::Quadratic),
            _ => Err(VegaForgeError::specification(format!(
                "unknown trendline method '{s}'"
            ))),
        }
    }
}

impl TrendlineMethod {
    /// True for methods computed with a regression transform
    pub fn is_regression(&self) -> bool {
        use TrendlineMethod::*;
        matches!(
            self,
            Linear | Logarithmic | Exponential | Power | Quadratic | Polynomial(_)
        )
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, TrendlineMethod::Average | TrendlineMethod::Median)
    }

    pub fn is_window(&self) -> bool {
        matches!(self, TrendlineMethod::MovingAverage(_))
    }

    /// Polynomial order of a regression method. An order below 1 is
    /// mathematically undefined, so this is one of the few hard errors.
    pub fn polynomial_order(&self) -> Result<u32> {
        let order = match self {
            TrendlineMethod::Linear => 1,
            TrendlineMethod::Quadratic => 2,
            TrendlineMethod::Polynomial(order) => *order,
            other => {
                return Err(VegaForgeError::invalid_parameter(format!(
                    "{other:?} does not have a polynomial order"
                )))
            }
        };
        if order < 1 {
            return Err(VegaForgeError::invalid_parameter(format!(
                "polynomial order must be at least 1, got {order}"
            )));
        }
        Ok(order)
    }

    /// Moving-average window width; zero-width windows are undefined
    pub fn moving_average_window(&self) -> Result<u32> {
        match self {
            TrendlineMethod::MovingAverage(width) if *width >= 1 => Ok(*width),
            TrendlineMethod::MovingAverage(width) => Err(VegaForgeError::invalid_parameter(
                format!("moving average window must be at least 1, got {width}"),
            )),
            other => Err(VegaForgeError::invalid_parameter(format!(
                "{other:?} is not a moving average"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TrendlineMethod;
    use std::str::FromStr;

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            TrendlineMethod::from_str("movingAverage-7").unwrap(),
            TrendlineMethod::MovingAverage(7)
        );
        assert_eq!(
            TrendlineMethod::from_str("polynomial-4").unwrap(),
            TrendlineMethod::Polynomial(4)
        );
        assert!(TrendlineMethod::from_str("bogus").is_err());
    }
}
