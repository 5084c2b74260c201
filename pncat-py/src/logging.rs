use std::{collections::HashMap, str::FromStr};

use pncat::{error::PetriError, Result};
use pyo3::{exceptions::PyRuntimeError, intern, prelude::*, types::PyDict};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::PyPetriResult;

struct PyDictVisitor<'a> {
    fields: Bound<'a, PyDict>,
}

macro_rules! set_field {
    ($dict: expr, $key: expr, $value: expr) => {
        if let Err(err) = $dict.set_item($key, $value) {
            print!(
                "Unable to write field '{}' (value={:?}) into a python dictionary, error: {}",
                $key, $value, err
            )
        }
    };
}

impl tracing::field::Visit for PyDictVisitor<'_> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        set_field!(self.fields, field.name(), value);
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        set_field!(self.fields, field.name(), value);
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        set_field!(self.fields, field.name(), value);
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        set_field!(self.fields, field.name(), value);
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        set_field!(self.fields, field.name(), value);
    }

    fn record_error(
        &mut self,
        field: &tracing::field::Field,
        value: &(dyn std::error::Error + 'static),
    ) {
        set_field!(self.fields, field.name(), value.to_string());
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        set_field!(self.fields, field.name(), format!("{:?}", value));
    }
}

/// Forwards `tracing` events to the standard library `logging` module.
///
/// The logger name is the event target with `::` replaced by `.`, so `pncat::classify` events
/// end up in `logging.getLogger("pncat.classify")`. All event fields apart from the message are
/// attached to the log record as `rust_fields`.
#[pyclass]
pub struct TracingToLogging {
    pub global_level: Level,
    pub target_levels: HashMap<String, Level>,
    pub logging: Py<PyModule>,
}

impl<S> Layer<S> for TracingToLogging
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        if !self.enabled(event.metadata(), ctx) {
            return;
        }
        Python::with_gil(|py| {
            let fields = PyDict::new(py);
            let mut visitor = PyDictVisitor { fields };
            event.record(&mut visitor);
            let PyDictVisitor { fields } = visitor;
            let msg = match fields.get_item("message") {
                Ok(Some(msg)) => {
                    if let Err(err) = fields.del_item("message") {
                        print!("Unable to remove the message from the log fields, error: {}", err)
                    }
                    msg
                }
                _ => intern!(py, "<log message missing>").as_any().clone(),
            };
            let metadata = event.metadata();
            let extra = PyDict::new(py);
            set_field!(extra, intern!(py, "rust_fields"), &fields);
            set_field!(extra, intern!(py, "rust_file"), metadata.file());
            set_field!(extra, intern!(py, "rust_line"), metadata.line());
            set_field!(extra, intern!(py, "rust_module_path"), metadata.module_path());
            let kwargs = PyDict::new(py);
            set_field!(kwargs, intern!(py, "extra"), &extra);

            let name = metadata.target().replace("::", ".");
            let logged = self
                .logging
                .bind(py)
                .call_method1(intern!(py, "getLogger"), (name,))
                .and_then(|logger| {
                    logger.call_method(
                        intern!(py, "log"),
                        (_python_level(*metadata.level()), msg),
                        Some(&kwargs),
                    )
                });
            if let Err(err) = logged {
                println!("Unable to forward message to python logging. Error: {}", err)
            }
        });
    }

    fn enabled(
        &self,
        metadata: &tracing::Metadata<'_>,
        _: tracing_subscriber::layer::Context<'_, S>,
    ) -> bool {
        let min_level = self
            .target_levels
            .iter()
            .filter(|&(prefix, _)| metadata.target().starts_with(prefix.as_str()))
            .max_by_key(|&(prefix, _)| prefix.len())
            .map(|(_, &level)| level)
            .unwrap_or(self.global_level);
        // more verbose levels compare as larger in tracing
        *metadata.level() <= min_level
    }
}

impl TracingToLogging {
    fn clone_ref(&self, py: Python<'_>) -> Self {
        Self {
            global_level: self.global_level,
            target_levels: self.target_levels.clone(),
            logging: self.logging.clone_ref(py),
        }
    }
}

#[pymethods]
impl TracingToLogging {
    #[new]
    fn new(py: Python<'_>) -> PyResult<Self> {
        let logging = py.import("logging")?;
        Ok(TracingToLogging {
            global_level: Level::INFO,
            logging: logging.unbind(),
            target_levels: Default::default(),
        })
    }

    #[getter]
    fn get_log_level(&self) -> &'static str {
        _log_level_to_str(self.global_level)
    }

    #[setter]
    fn set_log_level(&mut self, value: &str) -> PyPetriResult<()> {
        self.global_level = _parse_log_level(value)?;
        Ok(())
    }

    /// Level for all targets starting with `prefix`. The longest matching prefix wins.
    fn set_target_log_level(&mut self, prefix: &str, value: &str) -> PyPetriResult<()> {
        self.target_levels.insert(prefix.into(), _parse_log_level(value)?);
        Ok(())
    }

    fn get_target_log_level(&self, prefix: &str) -> Option<&'static str> {
        self.target_levels.get(prefix).map(|&l| _log_level_to_str(l))
    }

    /// Install as global tracing subscriber. Fails if one was installed before.
    fn install(&self, py: Python<'_>) -> PyResult<()> {
        tracing_subscriber::registry()
            .with(self.clone_ref(py))
            .try_init()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok(())
    }
}

/// Numeric levels of the python logging module. TRACE has no counterpart and maps below DEBUG.
fn _python_level(level: Level) -> u8 {
    match level {
        Level::ERROR => 40,
        Level::WARN => 30,
        Level::INFO => 20,
        Level::DEBUG => 10,
        _ => 5,
    }
}

fn _log_level_to_str(level: Level) -> &'static str {
    if level == Level::WARN {
        "warning"
    } else {
        level.as_str()
    }
}

fn _parse_log_level(value: &str) -> Result<Level> {
    if value.eq_ignore_ascii_case("warning") {
        Ok(Level::WARN)
    } else {
        Level::from_str(value).map_err(|_| {
            PetriError::ValueError(format!(
                "Log level must be one of trace, debug, info, warning or error, got '{value}'."
            ))
        })
    }
}
