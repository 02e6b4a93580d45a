pub mod api;
pub mod groq;
pub mod telegram;
