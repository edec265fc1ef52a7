use crate::spec::axis::AxisSpec;
use crate::spec::data::DataSpec;
use crate::spec::scale::ScaleSpec;
use crate::spec::signal::SignalSpec;
use crate::spec::values::StringOrStringList;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::HashMap;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkSpec {
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<MarkFromSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode: Option<MarkEncodeSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<DataSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<SignalSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<MarkSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scales: Vec<ScaleSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub axes: Vec<AxisSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Value>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl MarkSpec {
    pub fn new<T: Into<String>, N: Into<String>>(type_: T, name: N) -> Self {
        Self {
            type_: type_.into(),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_group(&self) -> bool {
        self.type_ == "group"
    }

    /// Depth-first walk over non-group marks, visiting nested group contents
    /// before later siblings
    pub fn walk_marks_mut(marks: &mut [MarkSpec], f: &mut dyn FnMut(&mut MarkSpec)) {
        for mark in marks.iter_mut() {
            if mark.is_group() {
                let mut nested = std::mem::take(&mut mark.marks);
                Self::walk_marks_mut(&mut nested, f);
                mark.marks = nested;
            } else {
                f(mark);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkEncodeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enter: Option<MarkEncodingsSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<MarkEncodingsSpec>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl MarkEncodeSpec {
    pub fn enter_mut(&mut self) -> &mut MarkEncodingsSpec {
        self.enter.get_or_insert_with(Default::default)
    }

    pub fn update_mut(&mut self) -> &mut MarkEncodingsSpec {
        self.update.get_or_insert_with(Default::default)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkEncodingsSpec {
    // per-channel production rules, e.g. x, y2, fill, strokeDash
    #[serde(flatten)]
    pub channels: HashMap<String, MarkEncodingOrList>,
}

impl MarkEncodingsSpec {
    pub fn channel(&self, name: &str) -> Option<&MarkEncodingOrList> {
        self.channels.get(name)
    }

    pub fn channel_mut(&mut self, name: &str) -> Option<&mut MarkEncodingOrList> {
        self.channels.get_mut(name)
    }

    pub fn set<S: Into<String>, R: Into<MarkEncodingOrList>>(&mut self, name: S, rule: R) {
        self.channels.insert(name.into(), rule.into());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkEncodingOrList {
    List(Vec<MarkEncodingSpec>),
    Scalar(Box<MarkEncodingSpec>),
}

impl MarkEncodingOrList {
    pub fn to_vec(&self) -> Vec<MarkEncodingSpec> {
        match self {
            MarkEncodingOrList::List(m) => m.clone(),
            MarkEncodingOrList::Scalar(m) => vec![m.as_ref().clone()],
        }
    }
}

impl From<MarkEncodingSpec> for MarkEncodingOrList {
    fn from(rule: MarkEncodingSpec) -> Self {
        MarkEncodingOrList::Scalar(Box::new(rule))
    }
}

impl From<Vec<MarkEncodingSpec>> for MarkEncodingOrList {
    fn from(rules: Vec<MarkEncodingSpec>) -> Self {
        MarkEncodingOrList::List(rules)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkEncodingSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<MarkEncodingField>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<Number>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkEncodingField {
    Field(String),
    Object(MarkEncodingFieldObject),
}

impl From<&str> for MarkEncodingField {
    fn from(v: &str) -> Self {
        MarkEncodingField::Field(v.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkEncodingFieldObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub datum: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkFromSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet: Option<MarkFacetSpec>,
}

impl MarkFromSpec {
    pub fn data<S: Into<String>>(data: S) -> Self {
        Self {
            data: Some(data.into()),
            facet: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkFacetSpec {
    pub data: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub groupby: Option<StringOrStringList>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
