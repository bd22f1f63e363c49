use anyhow::{anyhow, Context, Result};
use crossterm::style::Stylize;
use std::path::PathBuf;
use std::sync::Arc;

use qpl_viewer::api_client::QplClient;
use qpl_viewer::config::config::Config;
use qpl_viewer::data::data_view::DataView;
use qpl_viewer::help_text::HelpText;
use qpl_viewer::table_display::display_page;
use qpl_viewer::ui::tui_app::{run_tui, StartPosition};

/// Value following `flag`, if the flag is present
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        None => Ok(None),
        Some(pos) => args
            .get(pos + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| anyhow!("{} needs a value", flag)),
    }
}

fn number_flag(args: &[String], flag: &str) -> Result<Option<usize>> {
    flag_value(args, flag)?
        .map(|v| {
            v.parse::<usize>()
                .with_context(|| format!("{} expects a positive number, got '{}'", flag, v))
        })
        .transpose()
}

fn generate_config(args: &[String]) -> Result<()> {
    let path = match flag_value(args, "--config")? {
        Some(p) => PathBuf::from(p),
        None => Config::get_config_path()?,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating config directory {}", parent.display()))?;
    }
    std::fs::write(&path, Config::create_default_with_comments())
        .with_context(|| format!("Error writing config file {}", path.display()))?;

    println!("Configuration file created at: {:?}", path);
    println!("Edit this file to customize the QPL viewer.");
    Ok(())
}

fn run(args: &[String]) -> Result<()> {
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", HelpText::usage());
        return Ok(());
    }

    if args.iter().any(|a| a == "--generate-config") {
        return generate_config(args);
    }

    qpl_viewer::logging::init_tracing();

    let mut config = match flag_value(args, "--config")? {
        Some(path) => Config::load_from(&PathBuf::from(path))?,
        None => Config::load()?,
    };
    config.apply_env_overrides();
    if let Some(url) = flag_value(args, "--url")? {
        config.api.url = url.to_string();
    }
    if let Some(size) = number_flag(args, "--page-size")? {
        config.table.initial_page_size = size;
    }

    let start = StartPosition {
        search: flag_value(args, "--search")?.map(str::to_string),
        page: number_flag(args, "--page")?,
    };

    let client = QplClient::new(&config.api.url);

    if args.iter().any(|a| a == "--classic") {
        let records = client.fetch_records(config.fetch_range())?;
        let mut view = DataView::new(
            Arc::new(records),
            &config.column_rules(),
            config.table.initial_page_size,
            config.value_formatter()?,
        );
        if let Some(query) = &start.search {
            view.search(query);
        }
        if let Some(page) = start.page {
            view.go_to_page(page);
        }
        display_page(&view);
        return Ok(());
    }

    run_tui(config, client, start)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if let Err(e) = run(&args) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}
