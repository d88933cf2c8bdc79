use wasm_bindgen::prelude::*;

mod app;
pub mod components;
pub mod config;
pub mod control;
pub mod error;
mod handle;
mod logger;
pub mod size;
pub mod uploader;

pub use components::uploader::{FileUploader, FileUploaderProps};
pub use config::{ErrorMessages, UploaderConfig};
pub use control::{ControlState, FormControl, ValiditySink};
pub use error::{ConfigError, HostError};
pub use handle::UploaderHandle;
pub use size::format_file_size;
pub use uploader::{AcceptFilter, Action, FileInfo, FileLike, FormHost, Outcome, Uploader};

#[wasm_bindgen(start)]
pub fn start() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Render the demo page into `<body>`.
#[wasm_bindgen]
pub fn run_demo() {
    yew::Renderer::<app::App>::new().render();
}

/// Render an uploader into `element`, configured from that element's
/// attributes (`name`, `required`, `max-file-size`, `error-message-min`, ...).
#[wasm_bindgen]
pub fn mount_uploader(element: web_sys::Element) -> Result<UploaderHandle, JsValue> {
    let names = element.get_attribute_names();
    let attributes = names
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| {
            let value = element.get_attribute(&name)?;
            Some((name, value))
        });

    let config = UploaderConfig::from_attributes(attributes)?;
    log::debug!("mounting uploader `{}`", config.name);

    let app = yew::Renderer::<FileUploader>::with_root_and_props(
        element,
        FileUploaderProps {
            config,
            on_change: Default::default(),
        },
    )
    .render();
    Ok(UploaderHandle::new(app))
}
