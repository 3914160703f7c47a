mod commands;
mod terminal;

use commands::{CommandLine, Commands, Config, generate, update};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands: CommandLine = CommandLine::parse_args();
    let cfg: Config = commands.display_config();

    logging::init_logging(commands.verbose);
    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Update(args) => {
            print::header("updating relay list", cfg.quiet);
            update::update(args, &cfg).await
        }
        Commands::Generate(args) => {
            print::header("generating relay list", cfg.quiet);
            generate::generate(args, &cfg).await
        }
    }
}
