pub mod errors;
pub mod db;
pub mod validate;
pub mod admin;
pub mod settings;
pub mod booking;
pub mod contact_message;
pub mod newsletter_subscriber;
pub mod blog_post;

#[cfg(test)]
mod tests;
