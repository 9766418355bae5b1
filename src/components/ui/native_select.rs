use super::input::FIELD_CLASS;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// Plain `<select>` bound to a string signal.
#[component]
pub fn NativeSelect(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    options: Vec<String>,
    #[prop(into, optional)] invalid: Signal<bool>,
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let merged_class = tw_merge!("flex h-9", FIELD_CLASS, class);

    view! {
        <select
            data-name="NativeSelect"
            class=merged_class
            name=name
            id=id
            aria-invalid=move || invalid.get().to_string()
            prop:value=move || bind_value.get()
            on:change=move |ev: web_sys::Event| {
                if let Some(el) = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
                {
                    bind_value.set(el.value());
                }
            }
        >
            {options
                .into_iter()
                .map(|opt| {
                    let value = opt.clone();
                    let selected_value = opt.clone();
                    view! {
                        <option
                            value=value
                            selected=move || bind_value.get() == selected_value
                        >
                            {opt}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
