use std::{env, fs, path::PathBuf};

fn flag(long: &'static str, help: &'static str) -> clap::Arg {
    clap::Arg::new(long).long(long).help(help).action(clap::ArgAction::SetTrue)
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("schemalens")
        .version("1.0.0")
        .author("SchemaLens Contributors")
        .about("Inspect schema.org structured data in web pages")
        .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--compact "Print compact JSON instead of pretty JSON"))
        .arg(
            clap::Arg::new("type")
                .short('t')
                .long("type")
                .value_name("TYPE")
                .help("Only keep these types (repeatable)")
                .action(clap::ArgAction::Append),
        )
        .arg(flag("no-json-ld", "Skip JSON-LD script blocks"))
        .arg(flag("no-microdata", "Skip microdata attributes"))
        .arg(flag("no-rdfa", "Skip RDFa attributes"))
        .arg(flag("top-level-only", "Do not report nested items as types of their own"))
        .arg(
            clap::Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Base URL for resolving relative links"),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(
            clap::Arg::new("user-agent")
                .long("user-agent")
                .value_name("UA")
                .help("Custom User-Agent for HTTP requests"),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "schemalens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "schemalens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "schemalens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "schemalens", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
