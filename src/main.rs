use default_codable::cli::CommandLineInterface;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let command_line_interface = CommandLineInterface::load();
    command_line_interface.run()
}
