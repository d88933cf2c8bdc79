use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{File, FormData, HtmlFormElement, SubmitEvent};
use yew::prelude::*;

use crate::components::uploader::FileUploader;
use crate::config::UploaderConfig;
use crate::size::{format_file_size, DEFAULT_DECIMALS};
use crate::uploader::FileLike;

const FIELD_NAME: &str = "files";

/// Demo page: one form with an uploader and a log of what it submits.
pub struct App {
    config: UploaderConfig,
    logs: Vec<String>,
}

pub enum Msg {
    FilesChanged(Vec<Rc<File>>),
    Submitted(SubmitEvent),
    AddLog(String),
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = UploaderConfig {
            required: true,
            multiple: true,
            max: Some(3),
            accept: Some("image/png,.jpg".to_string()),
            label: Some("Pictures".to_string()),
            hint: Some("PNG or JPG, up to three files".to_string()),
            ..UploaderConfig::new(FIELD_NAME)
        };

        Self {
            config,
            logs: vec!["Uploader demo ready".to_string()],
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FilesChanged(files) => {
                self.add_log(ctx, format!("change: {} file(s)", files.len()));
                for file in &files {
                    self.add_log(ctx, describe(&**file));
                }
                false
            }
            Msg::Submitted(event) => {
                event.prevent_default();
                let Some(form) = event
                    .target()
                    .and_then(|target| target.dyn_into::<HtmlFormElement>().ok())
                else {
                    return false;
                };

                match FormData::new_with_form(&form) {
                    Ok(data) => {
                        let entries = data.get_all(FIELD_NAME);
                        self.add_log(ctx, format!("submit: {} entr(ies)", entries.length()));
                        for entry in entries.iter() {
                            if let Ok(file) = entry.dyn_into::<File>() {
                                self.add_log(ctx, describe(&file));
                            }
                        }
                    }
                    Err(err) => self.add_log(ctx, format!("Error reading form data: {:?}", err)),
                }
                false
            }
            Msg::AddLog(log) => {
                self.logs.push(log);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="app-container">
                <header>
                    <h1>{ "File Uploader" }</h1>
                </header>

                <main>
                    <form class="panel" onsubmit={ctx.link().callback(Msg::Submitted)}>
                        <FileUploader
                            config={self.config.clone()}
                            on_change={ctx.link().callback(Msg::FilesChanged)}
                        />

                        <div class="button-container">
                            <button type="submit">{ "Submit" }</button>
                            <button type="reset">{ "Reset" }</button>
                        </div>
                    </form>

                    <div class="panel">
                        <h2>{ "Logs" }</h2>
                        <div class="logs-container">
                            {
                                for self.logs.iter().map(|log| {
                                    html! { <div class="log-entry">{ log }</div> }
                                })
                            }
                        </div>
                    </div>
                </main>
            </div>
        }
    }
}

impl App {
    fn add_log(&mut self, ctx: &Context<Self>, message: String) {
        log::info!("{message}");
        let timestamp = js_sys::Date::new_0().to_locale_time_string("en-US");
        let log_entry = format!("[{}] {}", timestamp, message);
        ctx.link().send_message(Msg::AddLog(log_entry));
    }
}

fn describe<F: FileLike + ?Sized>(file: &F) -> String {
    format!(
        "{} ({}, {})",
        file.name(),
        file.mime_type(),
        format_file_size(file.size(), DEFAULT_DECIMALS)
    )
}
