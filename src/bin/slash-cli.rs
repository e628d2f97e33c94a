use clap::Parser;

/// Sends a slash command to a running server the way the chat platform does.
#[derive(Parser)]
#[command(name = "slash-cli")]
#[command(about = "Send a slash command to a slash-router server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, default_value = "")]
    token: String,

    /// Callback URL for delayed replies.
    #[arg(short, long)]
    response_url: Option<String>,

    #[arg(long, default_value = "cli")]
    user_name: String,

    /// Command name, e.g. "/deploy".
    command: String,

    /// Command text.
    #[arg(trailing_var_arg = true)]
    text: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let text = cli.text.join(" ");

    let mut form = vec![
        ("token", cli.token.as_str()),
        ("command", cli.command.as_str()),
        ("text", text.as_str()),
        ("user_name", cli.user_name.as_str()),
    ];
    if let Some(url) = &cli.response_url {
        form.push(("response_url", url.as_str()));
    }

    let res = reqwest::Client::new().post(&cli.url).form(&form).send().await?;
    let status = res.status();
    let body = res.text().await?;

    if status.is_success() {
        print!("{body}");
    } else {
        eprintln!("Error: server returned status {status}");
        eprint!("{body}");
    }
    Ok(())
}
