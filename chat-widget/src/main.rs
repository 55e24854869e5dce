#[tokio::main]
async fn main() {
    if let Err(e) = chat_widget_lib::run().await {
        eprintln!("chat-widget: {}", e);
        std::process::exit(1);
    }
}
