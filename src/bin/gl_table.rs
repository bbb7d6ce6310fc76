//! Print the glycemic food table for a serving size
//! Usage: cargo run --bin gl_table -- [serving_size_g] [category,category,...] [--pdf PATH] [--chart PATH]

use std::collections::BTreeSet;
use std::path::PathBuf;

use glycemic_load::catalog::CATALOG;
use glycemic_load::glycemic::{calculate, table_rows, Calculation, DEFAULT_SERVING_SIZE_G};
use glycemic_load::tools::charts::write_glycemic_chart;
use glycemic_load::tools::reports::generate_glycemic_report;

struct Args {
    serving_size_g: f64,
    categories: Option<BTreeSet<String>>,
    pdf: Option<PathBuf>,
    chart: Option<PathBuf>,
}

fn parse_args(raw: &[String]) -> Result<Args, String> {
    let mut args = Args {
        serving_size_g: DEFAULT_SERVING_SIZE_G,
        categories: None,
        pdf: None,
        chart: None,
    };
    let mut positional = 0;
    let mut iter = raw.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--pdf" => {
                let path = iter.next().ok_or("--pdf requires a path")?;
                args.pdf = Some(PathBuf::from(path));
            }
            "--chart" => {
                let path = iter.next().ok_or("--chart requires a path")?;
                args.chart = Some(PathBuf::from(path));
            }
            value if positional == 0 => {
                args.serving_size_g = value
                    .parse()
                    .map_err(|_| format!("Invalid serving size: {}", value))?;
                positional += 1;
            }
            value if positional == 1 => {
                args.categories = Some(
                    value
                        .split(',')
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty())
                        .collect(),
                );
                positional += 1;
            }
            value => return Err(format!("Unexpected argument: {}", value)),
        }
    }

    Ok(args)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&raw)?;

    let calculation = calculate(CATALOG, args.serving_size_g, args.categories.as_ref())?;

    for ignored in calculation.ignored_categories() {
        eprintln!("Ignoring unknown category: {}", ignored);
    }

    let (serving_size_g, results) = match calculation {
        Calculation::Empty { reason, .. } => {
            println!("{}", reason);
            return Ok(());
        }
        Calculation::Ready { serving_size_g, results, .. } => (serving_size_g, results),
    };

    print!("{}", table_rows(&results, serving_size_g).render_text());

    if let Some(path) = args.chart {
        write_glycemic_chart(&results, serving_size_g, &path)?;
        println!("\nChart written to {}", path.display());
    }

    if let Some(path) = args.pdf {
        let response = generate_glycemic_report(
            CATALOG,
            serving_size_g,
            args.categories.as_ref(),
            &path,
            None,
        )?;
        println!("\n{}", response.message);
        println!("Report written to {}", response.file_path);
    }

    Ok(())
}
