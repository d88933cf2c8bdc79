use std::rc::Rc;

use web_sys::{Event, File, FocusEvent, HtmlInputElement};
use yew::prelude::*;

use crate::uploader::host::files_from_list;

#[derive(Properties, PartialEq)]
pub struct FileInputProps {
    pub input_ref: NodeRef,
    pub name: AttrValue,
    pub on_files_selected: Callback<Vec<Rc<File>>>,
    pub on_blur: Callback<()>,
    #[prop_or_default]
    pub accept: Option<AttrValue>,
    #[prop_or(false)]
    pub multiple: bool,
    #[prop_or(false)]
    pub required: bool,
    #[prop_or(false)]
    pub disabled: bool,
}

/// Keeps the input focusable so native validity can be reported on it.
const VISUALLY_HIDDEN: &str =
    "position:absolute;width:1px;height:1px;margin:-1px;padding:0;border:0;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;";

/// The visually hidden native input; it is the element the form sees.
#[function_component(FileInput)]
pub fn file_input(props: &FileInputProps) -> Html {
    let on_change = {
        let on_files_selected = props.on_files_selected.clone();
        Callback::from(move |e: Event| {
            // The widget announces its own `change` with the files as detail.
            e.stop_propagation();
            let input: HtmlInputElement = e.target_unchecked_into();
            on_files_selected.emit(files_from_list(input.files()));
        })
    };

    let on_blur = {
        let on_blur = props.on_blur.clone();
        Callback::from(move |_: FocusEvent| on_blur.emit(()))
    };

    html! {
        <input
            ref={props.input_ref.clone()}
            type="file"
            class="input__field"
            style={VISUALLY_HIDDEN}
            name={props.name.clone()}
            accept={props.accept.clone()}
            multiple={props.multiple}
            required={props.required}
            disabled={props.disabled}
            onchange={on_change}
            onblur={on_blur}
        />
    }
}
