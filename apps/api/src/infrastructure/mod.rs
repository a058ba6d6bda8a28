pub mod ids;
pub mod llm;
pub mod storage;
