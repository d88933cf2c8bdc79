use js_sys::Promise;
use wasm_bindgen::prelude::*;
use yew::{AppHandle, Callback};

use crate::components::uploader::{FileUploader, Msg};

/// Returned by `mount_uploader`; drives the mounted control from the page the
/// way the form-control methods of a native input would.
#[wasm_bindgen]
pub struct UploaderHandle {
    app: AppHandle<FileUploader>,
}

impl UploaderHandle {
    pub(crate) fn new(app: AppHandle<FileUploader>) -> Self {
        Self { app }
    }
}

#[wasm_bindgen]
impl UploaderHandle {
    /// A non-empty message marks the control invalid until it is cleared with
    /// `null` or `""`.
    #[wasm_bindgen(js_name = setCustomValidity)]
    pub fn set_custom_validity(&self, message: Option<String>) {
        self.app.send_message(Msg::SetCustomValidity(message));
    }

    /// Resolves to whether the control is valid once the check has run.
    #[wasm_bindgen(js_name = reportValidity)]
    pub fn report_validity(&self) -> Promise {
        let app = &self.app;
        Promise::new(&mut |resolve, _reject| {
            let reply = Callback::from(move |valid: bool| {
                if let Err(err) = resolve.call1(&JsValue::NULL, &JsValue::from_bool(valid)) {
                    log::warn!("could not resolve validity report: {err:?}");
                }
            });
            app.send_message(Msg::ReportValidity(reply));
        })
    }

    pub fn reset(&self) {
        self.app.send_message(Msg::Reset);
    }

    /// Tear the widget down and release its listeners.
    pub fn unmount(self) {
        self.app.destroy();
    }
}
