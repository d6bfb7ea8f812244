//! Charts: named, lazily evaluated value producers.
//!
//! Producers are host code. They are expected to be fast, side-effect free,
//! and safe to call from the background submission thread. Nothing here
//! enforces that; `Chart::compute` only guarantees that an error or a panic
//! raised by a producer comes back as a `ProducerError`.

pub mod value;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde_json::{Number, Value};

use crate::errors::{BoxError, IdentifierError, ProducerError};
use crate::identifiers::ChartId;

pub use value::{DrilldownMap, NumberListMap, NumberMap, RawValue};

/// Boxed zero-argument producer. `Ok(None)` means "no value this time".
pub type Producer<T> = Box<dyn Fn() -> Result<Option<T>, BoxError> + Send + Sync>;

/// Variant tag of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Boolean,
    String,
    Number,
    Bar,
    Pie,
    Drilldown,
    Line,
    MultiLine,
    ComplexBar,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Number => "number",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Drilldown => "drilldown",
            Self::Line => "line",
            Self::MultiLine => "multi_line",
            Self::ComplexBar => "complex_bar",
        }
    }
}

enum ChartProducer {
    Boolean(Producer<bool>),
    String(Producer<String>),
    Number(Producer<Number>),
    Bar(Producer<NumberMap>),
    Pie(Producer<NumberMap>),
    Drilldown(Producer<DrilldownMap>),
    Line(Producer<Number>),
    MultiLine(Producer<NumberMap>),
    ComplexBar(Producer<NumberListMap>),
}

impl ChartProducer {
    fn kind(&self) -> ChartKind {
        match self {
            Self::Boolean(_) => ChartKind::Boolean,
            Self::String(_) => ChartKind::String,
            Self::Number(_) => ChartKind::Number,
            Self::Bar(_) => ChartKind::Bar,
            Self::Pie(_) => ChartKind::Pie,
            Self::Drilldown(_) => ChartKind::Drilldown,
            Self::Line(_) => ChartKind::Line,
            Self::MultiLine(_) => ChartKind::MultiLine,
            Self::ComplexBar(_) => ChartKind::ComplexBar,
        }
    }

    fn call(&self) -> Result<Option<RawValue>, BoxError> {
        Ok(match self {
            Self::Boolean(p) => p()?.map(RawValue::Boolean),
            Self::String(p) => p()?.map(RawValue::String),
            Self::Number(p) => p()?.map(RawValue::Number),
            Self::Bar(p) => p()?.map(RawValue::Bar),
            Self::Pie(p) => p()?.map(RawValue::Pie),
            Self::Drilldown(p) => p()?.map(RawValue::Drilldown),
            Self::Line(p) => p()?.map(RawValue::Line),
            Self::MultiLine(p) => p()?.map(RawValue::MultiLine),
            Self::ComplexBar(p) => p()?.map(RawValue::ComplexBar),
        })
    }
}

/// A named value producer contributing one entry to a submission.
pub struct Chart {
    id: ChartId,
    producer: ChartProducer,
}

impl Chart {
    fn with_producer(id: &str, producer: ChartProducer) -> Result<Self, IdentifierError> {
        Ok(Self {
            id: ChartId::new(id)?,
            producer,
        })
    }

    /// Single boolean value. `false` is a real reading and is submitted.
    pub fn boolean<F>(id: &str, producer: F) -> Result<Self, IdentifierError>
    where
        F: Fn() -> Result<Option<bool>, BoxError> + Send + Sync + 'static,
    {
        Self::with_producer(id, ChartProducer::Boolean(Box::new(producer)))
    }

    /// Single string value.
    pub fn string<S, F>(id: &str, producer: F) -> Result<Self, IdentifierError>
    where
        S: Into<String> + 'static,
        F: Fn() -> Result<Option<S>, BoxError> + Send + Sync + 'static,
    {
        Self::with_producer(id, ChartProducer::String(convert(producer)))
    }

    /// Single numeric value. Unlike [`Chart::line`], `0` is submitted.
    pub fn number<N, F>(id: &str, producer: F) -> Result<Self, IdentifierError>
    where
        N: Into<Number> + 'static,
        F: Fn() -> Result<Option<N>, BoxError> + Send + Sync + 'static,
    {
        Self::with_producer(id, ChartProducer::Number(convert(producer)))
    }

    /// Named numbers rendered as bars. An empty map is omitted.
    pub fn bar<M, K, N, F>(id: &str, producer: F) -> Result<Self, IdentifierError>
    where
        M: IntoIterator<Item = (K, N)> + 'static,
        K: Into<String> + 'static,
        N: Into<Number> + 'static,
        F: Fn() -> Result<Option<M>, BoxError> + Send + Sync + 'static,
    {
        Self::with_producer(id, ChartProducer::Bar(convert_map(producer)))
    }

    /// Named numbers rendered as pie slices. An empty map is omitted.
    pub fn pie<M, K, N, F>(id: &str, producer: F) -> Result<Self, IdentifierError>
    where
        M: IntoIterator<Item = (K, N)> + 'static,
        K: Into<String> + 'static,
        N: Into<Number> + 'static,
        F: Fn() -> Result<Option<M>, BoxError> + Send + Sync + 'static,
    {
        Self::with_producer(id, ChartProducer::Pie(convert_map(producer)))
    }

    /// Pie of pies. Empty inner maps are dropped; all empty means omitted.
    pub fn drilldown<F>(id: &str, producer: F) -> Result<Self, IdentifierError>
    where
        F: Fn() -> Result<Option<DrilldownMap>, BoxError> + Send + Sync + 'static,
    {
        Self::with_producer(id, ChartProducer::Drilldown(Box::new(producer)))
    }

    /// Single number plotted over time. `0` is treated as "no data" and omitted.
    pub fn line<N, F>(id: &str, producer: F) -> Result<Self, IdentifierError>
    where
        N: Into<Number> + 'static,
        F: Fn() -> Result<Option<N>, BoxError> + Send + Sync + 'static,
    {
        Self::with_producer(id, ChartProducer::Line(convert(producer)))
    }

    /// Several named lines. An empty map is omitted.
    pub fn multi_line<M, K, N, F>(id: &str, producer: F) -> Result<Self, IdentifierError>
    where
        M: IntoIterator<Item = (K, N)> + 'static,
        K: Into<String> + 'static,
        N: Into<Number> + 'static,
        F: Fn() -> Result<Option<M>, BoxError> + Send + Sync + 'static,
    {
        Self::with_producer(id, ChartProducer::MultiLine(convert_map(producer)))
    }

    /// Named lists of numbers. Empty lists are dropped; all empty means omitted.
    pub fn complex_bar<F>(id: &str, producer: F) -> Result<Self, IdentifierError>
    where
        F: Fn() -> Result<Option<NumberListMap>, BoxError> + Send + Sync + 'static,
    {
        Self::with_producer(id, ChartProducer::ComplexBar(Box::new(producer)))
    }

    pub fn id(&self) -> &ChartId {
        &self.id
    }

    pub fn kind(&self) -> ChartKind {
        self.producer.kind()
    }

    /// Invoke the producer. Errors and panics from host code become `ProducerError`.
    pub fn compute(&self) -> Result<Option<RawValue>, ProducerError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.producer.call()))
            .map_err(ProducerError::from_panic)?
            .map_err(ProducerError::Failed)
    }

    /// Compute and serialize. `Ok(None)` means the chart is left out of the payload.
    pub fn data(&self) -> Result<Option<Value>, ProducerError> {
        Ok(self.compute()?.and_then(RawValue::serialize))
    }
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .finish()
    }
}

fn convert<T, U, F>(producer: F) -> Producer<U>
where
    T: Into<U> + 'static,
    U: 'static,
    F: Fn() -> Result<Option<T>, BoxError> + Send + Sync + 'static,
{
    Box::new(move || -> Result<Option<U>, BoxError> { Ok(producer()?.map(Into::into)) })
}

fn convert_map<M, K, N, F>(producer: F) -> Producer<NumberMap>
where
    M: IntoIterator<Item = (K, N)> + 'static,
    K: Into<String> + 'static,
    N: Into<Number> + 'static,
    F: Fn() -> Result<Option<M>, BoxError> + Send + Sync + 'static,
{
    Box::new(move || -> Result<Option<NumberMap>, BoxError> {
        Ok(producer()?.map(|map| {
            map.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect()
        }))
    })
}
