mod form;

use std::path::PathBuf;

use log::{LevelFilter, info, warn};
use selection_field::{
    BindError, FieldEvent, FieldEventKind, FieldValue, HostEvent, MemoryHost, SelectionFields,
};
use simplelog::{Config, WriteLogger};

use form::{FormSpec, Step};

const BUNDLED_FORM: &str = include_str!("../forms/signup.json");

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("failed to read form file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid form description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

fn init_logging() -> Result<(), DemoError> {
    let level = std::env::var("SELECTION_FIELD_LOG")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    WriteLogger::init(level, Config::default(), std::io::stderr())?;
    Ok(())
}

fn load_form() -> Result<FormSpec, DemoError> {
    let text = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            std::fs::read_to_string(&path).map_err(|source| DemoError::Read { path, source })?
        }
        None => BUNDLED_FORM.to_string(),
    };
    Ok(serde_json::from_str(&text)?)
}

fn describe(fields: &SelectionFields<MemoryHost>, event: &FieldEvent) -> String {
    let element = fields
        .element(event.field)
        .map_or_else(|| event.field.to_string(), str::to_string);
    match &event.kind {
        FieldEventKind::Dirty => format!("{element}: dirty"),
        FieldEventKind::Clean => format!("{element}: clean"),
        FieldEventKind::AfterSet(value) => format!("{element}: set to '{value}'"),
        FieldEventKind::StatusUpdate { status, value } => format!("{element}: {status} = {value}"),
    }
}

fn flush_events(fields: &mut SelectionFields<MemoryHost>) {
    for event in fields.drain_events() {
        info!("event {}", describe(fields, &event));
    }
}

async fn run_step(fields: &mut SelectionFields<MemoryHost>, step: &Step) {
    match step {
        Step::Click(element) => {
            if fields.host_mut().click(element) {
                fields.dispatch(&HostEvent::Change(element.clone()));
            } else {
                warn!("click on {element} had no effect");
            }
        }
        Step::CheckDirty(element) => match fields.field_by_element(element) {
            Some(mut field) => field.check_dirty(),
            None => warn!("{element} is not bound"),
        },
        Step::Set { element, value } => match fields.field_by_element(element) {
            Some(mut field) => field.set(FieldValue::from(value.clone())),
            None => warn!("{element} is not bound"),
        },
        Step::Hover(element) => {
            fields.dispatch(&HostEvent::PointerEnter(element.clone()));
        }
        Step::Disable(element) => match fields.field_by_element(element) {
            Some(mut field) => field.disable(),
            None => warn!("{element} is not bound"),
        },
        Step::Validate => {
            let result = fields.validate_all();
            if result.is_valid() {
                info!("form is valid");
            }
            for failure in result.failures() {
                info!("invalid: {} ({})", failure.key, failure.element);
            }
        }
        Step::Settle => {
            while fields.next_deadline().is_some() {
                let cleaned = fields.settle().await;
                info!("clean checks settled, {cleaned} field(s) clean");
            }
        }
        Step::Remove(element) => {
            fields.host_mut().remove(element);
            fields.dispatch(&HostEvent::Removed(element.clone()));
        }
    }
}

async fn run() -> Result<(), DemoError> {
    init_logging()?;
    let spec = load_form()?;

    let mut fields = SelectionFields::with_config(spec.host(), spec.config.clone());
    for input in spec.inputs.iter().filter(|input| !input.unbound) {
        let id = fields.bind(&input.id, input.options.clone())?;
        info!("bound {} as {id}", input.id);
    }
    flush_events(&mut fields);

    for step in &spec.script {
        info!("step {step:?}");
        run_step(&mut fields, step).await;
        flush_events(&mut fields);
    }

    for (key, value) in fields.values() {
        println!("{key} = {value}");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
