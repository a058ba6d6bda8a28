pub async fn hello() -> &'static str {
    "Hello Poesy!"
}
