use prisma_json_narrow::{cli, logging};

fn main() {
    logging::init_tracing();
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("prisma-json-narrow: {error:#}");
        std::process::exit(1);
    }
}
