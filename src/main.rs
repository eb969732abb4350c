use KiCurves::Examples::kinetics_examples::kin_examples;
use KiCurves::Examples::statmech_examples::statmech_examples;
use KiCurves::Examples::thermo_examples::thermo_examples;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

pub fn main() {
    //
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap_or_else(|e| eprintln!("logger was not initialised: {}", e));
    let task: usize = 3;
    kin_examples(task);
    thermo_examples(2);
    statmech_examples(1);
}
