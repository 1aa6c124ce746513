use std::fs;
use std::path::PathBuf;

use area_chart::render::NullRenderer;
use area_chart::telemetry::init_default_tracing;
use area_chart::widget::{AreaChart, AreaChartProps};

#[derive(Debug)]
struct CliArgs {
    props: PathBuf,
    ticks: u32,
    output: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = init_default_tracing();
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.props)
        .map_err(|err| format!("failed to read `{}`: {err}", args.props.display()))?;
    let props = AreaChartProps::from_json_str(&raw).map_err(|err| err.to_string())?;
    let period = props.cycle_period();

    let mut widget = AreaChart::new(props, |_| Ok(NullRenderer::default()));
    widget.mount().map_err(|err| format!("mount failed: {err}"))?;
    let fired = widget
        .advance(period * args.ticks)
        .map_err(|err| format!("tick failed: {err}"))?;
    if fired != args.ticks as usize {
        return Err(format!("expected {} ticks, fired {fired}", args.ticks));
    }

    let chart = widget
        .chart()
        .ok_or_else(|| "chart was not constructed".to_owned())?;
    let json = chart
        .snapshot()
        .to_json_contract_v1_pretty()
        .map_err(|err| err.to_string())?;

    match args.output {
        Some(path) => fs::write(&path, format!("{json}\n"))
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    const USAGE: &str = "usage: area_chart_snapshot <props.json> [ticks] [--output <path>]";
    let mut args = std::env::args().skip(1);
    let props = args.next().map(PathBuf::from).ok_or_else(|| USAGE.to_owned())?;

    let mut ticks = 0;
    let mut output = None::<PathBuf>;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            value => {
                ticks = value
                    .parse::<u32>()
                    .map_err(|err| format!("invalid tick count `{value}`: {err}\n{USAGE}"))?;
            }
        }
    }

    Ok(CliArgs {
        props,
        ticks,
        output,
    })
}
