mod client;
mod dto;
mod mapper;

pub use client::KakaoSearchClient;
