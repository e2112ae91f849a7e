// Defaults loaded from the environment, plus the fixed page and instruction text.

use std::env;

/// Environment variables searched, in order, for the Gemini API key.
/// The hyphenated name is what older `.env` files for this app used.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GEMINI-API-KEY"];

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

lazy_static::lazy_static! {
    pub static ref GEMINI_BASE_URL: String = env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    pub static ref GEMINI_MODEL: String = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    pub static ref GEMINI_API_KEY: Option<String> = API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty());
    pub static ref REQUEST_TIMEOUT_SECS: u64 = env::var("QURAN_ASSISTANT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
}

pub const SYSTEM_INSTRUCTION: &str = "You are Quran's Topic Agent. Your task is to answer questions strictly based \
on what the Quran says about the topic the user asks. Give the Arabic ayat. Always include a translation \
of the relevant Quranic Ayat in Roman Urdu. Do not provide irrelevant or unrelated information.";

pub const PAGE_TITLE: &str = "Quran Topic Assistant";
pub const PAGE_HEADING: &str = "📖 Quran's Topic AI Assistant";
pub const PAGE_DESCRIPTION: &str = "Ask any question, and get answers based on what the Quran says (with Roman Urdu translation of the Ayat).";
pub const INPUT_LABEL: &str = "❓ What would you like to ask from the Quran?";
pub const BUTTON_LABEL: &str = "Get Answer";
pub const WAITING_MESSAGE: &str = "Thinking...";
pub const SUCCESS_MESSAGE: &str = "Here's what the Quran says:";
pub const ERROR_PREFIX: &str = "❌ An error occurred: ";
