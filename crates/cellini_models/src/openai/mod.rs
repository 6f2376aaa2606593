//! OpenAI-compatible chat-completions driver.

mod client;
mod conversion;
mod dto;

pub use client::OpenAiClient;
pub use dto::{
    ApiChoice, ApiContent, ApiMessage, ApiResponseMessage, ChatCompletionRequest,
    ChatCompletionRequestBuilder, ChatCompletionResponse, ContentPart, ImageUrl, ResponseFormat,
};
