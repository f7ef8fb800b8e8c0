use registro_http::{Parser, Service, run, settings::command::Args};

#[tokio::main]
async fn main() {
    if let Err(e) = run(Service::Subjects, Args::parse()).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
