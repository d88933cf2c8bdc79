//! Browser side of the uploader: the hidden native file input is the element
//! that actually belongs to the `<form>`.
//!
//! Native validity reporting anchors its bubble on that input, not on the drop
//! zone around it. The input therefore has to stay in layout (clipped to one
//! pixel, never `display: none`), otherwise the browser refuses to report it
//! as "not focusable".

use std::rc::Rc;

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsValue;
use web_sys::{
    Blob, CustomEvent, CustomEventInit, DataTransfer, EventTarget, File, FileList,
    HtmlFormElement, HtmlInputElement,
};
use yew::NodeRef;

use super::{FileLike, FormHost};
use crate::control::ValiditySink;
use crate::error::HostError;

impl FileLike for File {
    fn name(&self) -> String {
        File::name(self)
    }

    fn size(&self) -> u64 {
        Blob::size(self) as u64
    }

    fn mime_type(&self) -> String {
        Blob::type_(self)
    }
}

/// Publishes through the native `<input type="file">` the component renders.
/// Calls made before mount or after unmount are ignored.
#[derive(Debug, Clone)]
pub struct NativeInputHost {
    input: NodeRef,
}

impl NativeInputHost {
    pub fn new(input: NodeRef) -> Self {
        Self { input }
    }

    pub fn node_ref(&self) -> &NodeRef {
        &self.input
    }

    pub fn input(&self) -> Option<HtmlInputElement> {
        self.input.cast::<HtmlInputElement>()
    }

    /// Form the native input belongs to, once mounted.
    pub fn form(&self) -> Option<HtmlFormElement> {
        self.input().and_then(|input| input.form())
    }
}

impl ValiditySink for NativeInputHost {
    fn set_validity(&self, message: Option<&str>) {
        match self.input() {
            Some(input) => input.set_custom_validity(message.unwrap_or("")),
            None => log::debug!("validity update skipped, input not mounted"),
        }
    }
}

impl FormHost for NativeInputHost {
    type File = File;

    fn set_form_value(&self, name: &str, files: &[Rc<File>]) -> Result<(), HostError> {
        let input = self.input().ok_or(HostError::Detached)?;

        let transfer = DataTransfer::new()?;
        let items = transfer.items();
        for file in files {
            items.add_with_file(file)?;
        }

        input.set_name(name);
        input.set_files(transfer.files().as_ref());
        Ok(())
    }
}

pub fn files_from_list(list: Option<FileList>) -> Vec<Rc<File>> {
    let Some(list) = list else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(Rc::new)
        .collect()
}

/// Fire `change` with `detail.value` holding the files; it bubbles and
/// crosses shadow roots.
pub fn dispatch_change(target: &EventTarget, files: &[Rc<File>]) -> Result<(), HostError> {
    let value: Array = files.iter().map(|file| JsValue::from(File::clone(file))).collect();
    let detail = Object::new();
    Reflect::set(&detail, &JsValue::from_str("value"), &value)?;

    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_composed(true);
    init.set_detail(&detail);

    let event = CustomEvent::new_with_event_init_dict("change", &init)?;
    target.dispatch_event(&event)?;
    Ok(())
}
