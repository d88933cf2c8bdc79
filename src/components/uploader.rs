use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use web_sys::{DragEvent, File, HtmlElement};
use yew::prelude::*;

use crate::components::{file_input::FileInput, file_list::FileList};
use crate::config::UploaderConfig;
use crate::control::FormControl;
use crate::size::{format_file_size, DEFAULT_DECIMALS};
use crate::uploader::host::{dispatch_change, files_from_list, NativeInputHost};
use crate::uploader::{Action, Uploader};

#[derive(Properties, PartialEq)]
pub struct FileUploaderProps {
    #[prop_or_default]
    pub config: UploaderConfig,
    #[prop_or_default]
    pub on_change: Callback<Vec<Rc<File>>>,
}

pub enum Msg {
    LabelClicked,
    Blurred,
    FilesSelected(Vec<Rc<File>>),
    FilesDropped(Vec<Rc<File>>),
    RemoveFile(Rc<File>),
    DragOver,
    DragLeave,
    InitialCheck,
    Reset,
    SetCustomValidity(Option<String>),
    ReportValidity(Callback<bool>),
}

pub struct FileUploader {
    control: Uploader<NativeInputHost>,
    root: NodeRef,
    _reset_listener: Option<EventListener>,
}

impl Component for FileUploader {
    type Message = Msg;
    type Properties = FileUploaderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let host = NativeInputHost::new(NodeRef::default());
        let config = ctx.props().config.clone();
        let name = config.name.clone();

        let control = match Uploader::new(config, host.clone()) {
            Ok(control) => control,
            Err(err) => {
                log::error!("invalid uploader configuration ({err}), using defaults");
                Uploader::with_defaults(name, host)
            }
        };

        Self {
            control,
            root: NodeRef::default(),
            _reset_listener: None,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let config = &ctx.props().config;
        if *config != old_props.config {
            if let Err(err) = self.control.reconfigure(config.clone()) {
                log::error!("ignoring invalid uploader configuration: {err}");
            }
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let action = match msg {
            Msg::LabelClicked => {
                if let Some(input) = self.control.host().input() {
                    if let Err(err) = input.focus() {
                        log::debug!("could not focus file input: {err:?}");
                    }
                }
                Action::Touch
            }
            Msg::Blurred => Action::Touch,
            Msg::FilesSelected(files) => Action::Select(files),
            Msg::FilesDropped(files) => Action::Drop(files),
            Msg::RemoveFile(file) => Action::Remove(file),
            Msg::DragOver => Action::DragOver,
            Msg::DragLeave => Action::DragLeave,
            Msg::InitialCheck => Action::InitialCheck,
            Msg::Reset => Action::Reset,
            Msg::SetCustomValidity(message) => Action::SetCustomValidity(message),
            Msg::ReportValidity(reply) => {
                let outcome = self.control.apply(Action::ReportValidity);
                reply.emit(outcome.valid.unwrap_or(false));
                return outcome.render;
            }
        };

        let outcome = self.control.apply(action);
        if let Some(value) = outcome.changed {
            self.notify(ctx, value);
        }
        outcome.render
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let config = self.control.config();
        let link = ctx.link();
        let message = self.control.displayed_message();

        let ondragover = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::DragOver
        });
        let ondragleave = link.callback(|_: DragEvent| Msg::DragLeave);
        let ondrop = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::FilesDropped(files_from_list(e.data_transfer().and_then(|dt| dt.files())))
        });

        let primary = config
            .placeholder
            .clone()
            .unwrap_or_else(|| "Drag and drop files here".to_string());

        html! {
            <div ref={self.root.clone()} class={classes!("input", message.is_some().then_some("error"))}>
                <div class="input__wrapper">
                    {
                        if let Some(label) = &config.label {
                            html! {
                                <span class="input__label" onclick={link.callback(|_: MouseEvent| Msg::LabelClicked)}>
                                    { label.clone() }
                                </span>
                            }
                        } else {
                            html! {}
                        }
                    }

                    <div class="input__container">
                        <label
                            class={classes!("input__main", self.control.is_dragover().then_some("dragover"))}
                            tabindex="0"
                            {ondragover}
                            {ondragleave}
                            {ondrop}
                        >
                            <div class="input__text">
                                <p class="input__text-primary">{ primary }</p>
                                <p class="input__text-secondary">{ limits_summary(config) }</p>
                            </div>

                            <div class="input__divider"></div>

                            <div class="input__action">
                                <span class="input__action-text">{ "or" }</span>
                                <span class="input__action-link">{ "Browse files" }</span>
                            </div>

                            <FileInput
                                input_ref={self.control.host().node_ref().clone()}
                                name={config.name.clone()}
                                accept={config.accept.clone().map(AttrValue::from)}
                                multiple={config.multiple}
                                required={config.required}
                                disabled={config.disabled}
                                on_files_selected={link.callback(Msg::FilesSelected)}
                                on_blur={link.callback(|_: ()| Msg::Blurred)}
                            />
                        </label>
                    </div>
                </div>

                {
                    match message.or(config.hint.as_deref()) {
                        Some(text) => html! { <p class="input__message">{ text.to_string() }</p> },
                        None => html! {},
                    }
                }

                <FileList
                    files={self.control.value().to_vec()}
                    on_remove={link.callback(Msg::RemoveFile)}
                    disabled={config.disabled}
                />
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }

        // Let the embedding page finish configuring before the first check.
        let link = ctx.link().clone();
        Timeout::new(0, move || link.send_message(Msg::InitialCheck)).forget();

        if let Some(form) = self.control.host().form() {
            let link = ctx.link().clone();
            self._reset_listener = Some(EventListener::new(&form, "reset", move |_| {
                link.send_message(Msg::Reset)
            }));
        }
    }
}

impl FileUploader {
    fn notify(&self, ctx: &Context<Self>, value: Vec<Rc<File>>) {
        if let Some(root) = self.root.cast::<HtmlElement>() {
            if let Err(err) = dispatch_change(&root, &value) {
                log::warn!("failed to dispatch change event: {err}");
            }
        }
        ctx.props().on_change.emit(value);
    }
}

fn limits_summary(config: &UploaderConfig) -> String {
    let size = format_file_size(config.max_file_size, DEFAULT_DECIMALS);
    match config.max {
        Some(1) => format!("1 file, up to {size}"),
        Some(max) => format!("Up to {max} files, {size} each"),
        None => format!("Up to {size} per file"),
    }
}
