#[actix_web::main]
async fn main() {
    if let Err(err) = csv_viewer_lib::run().await {
        eprintln!("csv-viewer: {}", err);
        std::process::exit(1);
    }
}
