pub mod aggregate;
pub mod collect;
pub mod filter;
pub mod formula;
pub mod identifier;
pub mod lookup;
pub mod regression;
pub mod stack;
pub mod timeunit;
pub mod window;

use crate::spec::transform::aggregate::AggregateTransformSpec;
use crate::spec::transform::collect::CollectTransformSpec;
use crate::spec::transform::filter::FilterTransformSpec;
use crate::spec::transform::formula::FormulaTransformSpec;
use crate::spec::transform::identifier::IdentifierTransformSpec;
use crate::spec::transform::lookup::LookupTransformSpec;
use crate::spec::transform::regression::RegressionTransformSpec;
use crate::spec::transform::stack::StackTransformSpec;
use crate::spec::transform::timeunit::TimeUnitTransformSpec;
use crate::spec::transform::window::WindowTransformSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransformSpec {
    Aggregate(AggregateTransformSpec),
    Collect(CollectTransformSpec),
    Filter(FilterTransformSpec),
    Formula(FormulaTransformSpec),
    Identifier(IdentifierTransformSpec),
    Lookup(LookupTransformSpec),
    Regression(RegressionTransformSpec),
    Stack(StackTransformSpec),
    TimeUnit(TimeUnitTransformSpec),
    Window(WindowTransformSpec),
}

impl TransformSpec {
    pub fn type_name(&self) -> &'static str {
        match self {
            TransformSpec::Aggregate(_) => "aggregate",
            TransformSpec::Collect(_) => "collect",
            TransformSpec::Filter(_) => "filter",
            TransformSpec::Formula(_) => "formula",
            TransformSpec::Identifier(_) => "identifier",
            TransformSpec::Lookup(_) => "lookup",
            TransformSpec::Regression(_) => "regression",
            TransformSpec::Stack(_) => "stack",
            TransformSpec::TimeUnit(_) => "timeunit",
            TransformSpec::Window(_) => "window",
        }
    }

    /// Fields this transform makes available to transforms later in the same
    /// list. Ordering within a data source's transform list matters because
    /// of exactly these fields.
    pub fn output_fields(&self) -> Vec<String> {
        match self {
            TransformSpec::Aggregate(t) => t.output_fields(),
            TransformSpec::Collect(_) | TransformSpec::Filter(_) => Vec::new(),
            TransformSpec::Formula(t) => vec![t.as_.clone()],
            TransformSpec::Identifier(t) => vec![t.as_.clone()],
            TransformSpec::Lookup(t) => t.output_fields(),
            TransformSpec::Regression(t) => t.output_fields(),
            TransformSpec::Stack(t) => t.as_(),
            TransformSpec::TimeUnit(t) => t.as_(),
            TransformSpec::Window(t) => t.output_fields(),
        }
    }
}
