pub(crate) mod category_page;
pub(crate) mod comment_panel;
pub(crate) mod feed_page;
pub(crate) mod home_page;
pub(crate) mod login_page;
pub(crate) mod nav;
pub(crate) mod profile_page;
pub(crate) mod settings_page;
pub(crate) mod user_page;
