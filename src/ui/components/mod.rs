pub mod auth_form;
pub mod dashboard;
pub mod level_list;
pub mod post_feed;
pub mod progress_bar;
pub mod stats_panel;
pub mod toast;
pub mod typing_area;
