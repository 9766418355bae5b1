use super::input::FIELD_CLASS;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(default = 8)] rows: u32,
    #[prop(into, optional)] invalid: Signal<bool>,
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let merged_class = tw_merge!("min-h-24 py-2 resize-y", FIELD_CLASS, class);

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            name=name
            id=id
            rows=rows
            aria-invalid=move || invalid.get().to_string()
            prop:value=move || bind_value.get()
            on:input=move |ev: web_sys::Event| {
                if let Some(el) = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
                {
                    bind_value.set(el.value());
                }
            }
        />
    }
}
