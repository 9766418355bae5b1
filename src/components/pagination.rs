use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use icons::{ChevronLeft, ChevronRight};
use leptos::prelude::*;

/// Page buttons shown around the current page.
const PAGE_WINDOW: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PageItem {
    Page(u32),
    Ellipsis,
}

pub(crate) fn should_paginate(total_pages: u32) -> bool {
    total_pages > 1
}

/// Buttons for `current` of `total`: a window of pages, with the first and
/// last page and ellipses when the window does not reach them.
pub(crate) fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let half = PAGE_WINDOW / 2;

    let mut start = current.saturating_sub(half).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total);
    start = end.saturating_sub(PAGE_WINDOW - 1).max(1);

    let mut items = Vec::new();
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total {
        if end + 1 < total {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
    }
    items
}

#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    on_change: Callback<u32>,
) -> impl IntoView {
    let go = move |p: u32| {
        if p != page.get_untracked() {
            on_change.run(p);
        }
    };

    view! {
        <nav data-name="Pagination" aria-label="Pagination" class="flex items-center gap-1">
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:aria-label="Previous page"
                attr:disabled=move || page.get() <= 1
                on:click=move |_| go(page.get_untracked().saturating_sub(1).max(1))
            >
                <ChevronLeft />
            </Button>

            {move || {
                let current = page.get();
                page_items(current, total_pages.get())
                    .into_iter()
                    .map(|item| match item {
                        PageItem::Page(p) => {
                            let variant = if p == current {
                                ButtonVariant::Default
                            } else {
                                ButtonVariant::Outline
                            };
                            view! {
                                <Button
                                    variant=variant
                                    size=ButtonSize::Sm
                                    attr:aria-current=if p == current { "page" } else { "false" }
                                    on:click=move |_| go(p)
                                >
                                    {p.to_string()}
                                </Button>
                            }
                            .into_any()
                        }
                        PageItem::Ellipsis => {
                            view! { <span class="px-1 text-muted-foreground">"…"</span> }.into_any()
                        }
                    })
                    .collect_view()
            }}

            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:aria-label="Next page"
                attr:disabled=move || page.get() >= total_pages.get()
                on:click=move |_| {
                    let next = (page.get_untracked() + 1).min(total_pages.get_untracked());
                    go(next)
                }
            >
                <ChevronRight />
            </Button>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::*;

    #[test]
    fn test_single_page_is_not_paginated() {
        assert!(!should_paginate(0));
        assert!(!should_paginate(1));
        assert!(should_paginate(2));
    }

    #[test]
    fn test_three_pages_render_every_page() {
        assert_eq!(page_items(1, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_items(3, 3), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn test_window_in_the_middle() {
        assert_eq!(
            page_items(10, 20),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10), Page(11), Page(12), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_window_at_the_edges() {
        assert_eq!(
            page_items(1, 8),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(8)]
        );
        assert_eq!(
            page_items(8, 8),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Page(7), Page(8)]
        );
    }

    #[test]
    fn test_no_ellipsis_for_adjacent_edge() {
        assert_eq!(
            page_items(4, 6),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6)]
        );
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        assert_eq!(page_items(9, 3), vec![Page(1), Page(2), Page(3)]);
        assert!(page_items(1, 0).is_empty());
    }
}
