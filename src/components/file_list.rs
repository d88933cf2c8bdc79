use std::rc::Rc;

use web_sys::File;
use yew::prelude::*;

use crate::size::{format_file_size, DEFAULT_DECIMALS};
use crate::uploader::FileLike;

#[derive(Properties, PartialEq)]
pub struct FileListProps {
    pub files: Vec<Rc<File>>,
    pub on_remove: Callback<Rc<File>>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(FileList)]
pub fn file_list(props: &FileListProps) -> Html {
    html! {
        <table class="file-list">
            <tbody>
                {
                    for props.files.iter().map(|file| {
                        let onclick = {
                            let on_remove = props.on_remove.clone();
                            let file = file.clone();
                            Callback::from(move |_: MouseEvent| on_remove.emit(file.clone()))
                        };

                        html! {
                            <tr>
                                <td class="file-list__item file-list__name">{ FileLike::name(&**file) }</td>
                                <td class="file-list__item file-list__size">
                                    { format_file_size(FileLike::size(&**file), DEFAULT_DECIMALS) }
                                </td>
                                <td class="file-list__item">
                                    <span class="file-list__status">
                                        <span class="file-list__status-text">{ "Ready" }</span>
                                    </span>
                                </td>
                                <td class="file-list__item file-list__delete">
                                    <button
                                        type="button"
                                        class="file-list__delete--btn"
                                        aria-label="Remove file"
                                        disabled={props.disabled}
                                        {onclick}
                                    >
                                        { "✕" }
                                    </button>
                                </td>
                            </tr>
                        }
                    })
                }
            </tbody>
        </table>
    }
}
