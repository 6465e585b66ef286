pub mod user_banner;
