use icons::X;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;

/// Overlay dialog. Visibility is owned by the caller; the modal only reports
/// close requests (Escape, backdrop click, close button) through `on_close`.
#[component]
pub fn Modal(
    #[prop(into, default = "Dialog".to_string())] title: String,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let escape = window_event_listener(leptos::ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || escape.remove());

    view! {
        <div
            data-name="ModalBackdrop"
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4"
            on:click=move |_| on_close.run(())
        >
            <div
                data-name="Modal"
                role="dialog"
                aria-modal="true"
                aria-label=title
                class="relative w-full max-w-lg rounded-2xl border bg-background p-6 shadow-lg"
                on:click=|ev| ev.stop_propagation()
            >
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute top-4 right-4 rounded-sm p-1 opacity-70 hover:opacity-100"
                    on:click=move |_| on_close.run(())
                >
                    <X class="size-4" />
                </button>
                {children()}
            </div>
        </div>
    }
}
