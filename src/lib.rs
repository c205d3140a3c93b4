// aigc-relay - Access-code gated relay for OpenAI, HuggingFace and Stable Diffusion
// Author: kelexine (https://github.com/kelexine)

pub mod access;
pub mod cli;
pub mod config;
pub mod error;
pub mod forward;
pub mod metrics;
pub mod provider;
pub mod server;
pub mod utils;
