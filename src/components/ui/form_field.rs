use crate::components::ui::FieldError;
use leptos::prelude::*;
use tw_merge::*;

/// Labelled form control with its validation message underneath.
#[component]
pub fn FormField(
    #[prop(into)] label: String,
    #[prop(into)] html_for: String,
    #[prop(into, optional)] error: Signal<Option<String>>,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let class = tw_merge!("flex flex-col gap-1.5", class);

    view! {
        <div data-name="FormField" class=class>
            <label class="text-sm leading-none font-medium select-none" r#for=html_for>
                {label}
            </label>
            {children()}
            {move || error.get().map(|msg| view! { <FieldError>{msg}</FieldError> })}
        </div>
    }
}
