pub mod modal;
pub mod note_form;
pub mod note_list;
pub mod pagination;
pub mod search_box;
pub mod tags_menu;
pub mod ui;
