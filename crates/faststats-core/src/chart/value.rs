//! Raw chart values and their per-variant serialization rules.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

/// Named numeric series used by bar, pie, and multi-line charts.
pub type NumberMap = BTreeMap<String, Number>;

/// Two-level series used by drilldown charts.
pub type DrilldownMap = BTreeMap<String, NumberMap>;

/// Named lists of numbers used by complex bar charts.
pub type NumberListMap = BTreeMap<String, Vec<Number>>;

/// A value as returned by a producer, tagged with the variant that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Boolean(bool),
    String(String),
    Number(Number),
    Bar(NumberMap),
    Pie(NumberMap),
    Drilldown(DrilldownMap),
    Line(Number),
    MultiLine(NumberMap),
    ComplexBar(NumberListMap),
}

impl RawValue {
    /// Serialize into the payload shape, or `None` when the value counts as empty.
    ///
    /// Single values are always kept (`false` and `0` are real readings). Maps
    /// are dropped when empty. Line charts treat `0` as "no data".
    pub fn serialize(self) -> Option<Value> {
        match self {
            Self::Boolean(b) => Some(Value::Bool(b)),
            Self::String(s) => Some(Value::String(s)),
            Self::Number(n) => Some(Value::Number(n)),
            Self::Bar(map) | Self::Pie(map) | Self::MultiLine(map) => number_map(map),
            Self::Drilldown(drilldown) => {
                let values: Map<String, Value> = drilldown
                    .into_iter()
                    .filter_map(|(key, inner)| number_map(inner).map(|v| (key, v)))
                    .collect();
                non_empty(values)
            }
            Self::Line(n) => {
                if is_zero(&n) {
                    None
                } else {
                    Some(Value::Number(n))
                }
            }
            Self::ComplexBar(bars) => {
                let values: Map<String, Value> = bars
                    .into_iter()
                    .filter(|(_, list)| !list.is_empty())
                    .map(|(key, list)| (key, Value::Array(list.into_iter().map(Value::Number).collect())))
                    .collect();
                non_empty(values)
            }
        }
    }
}

fn number_map(map: NumberMap) -> Option<Value> {
    non_empty(map.into_iter().map(|(k, v)| (k, Value::Number(v))).collect())
}

fn non_empty(map: Map<String, Value>) -> Option<Value> {
    if map.is_empty() {
        None
    } else {
        Some(Value::Object(map))
    }
}

fn is_zero(n: &Number) -> bool {
    n.as_f64().is_some_and(|v| v == 0.0)
}
