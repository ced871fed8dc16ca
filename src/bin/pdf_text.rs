use std::{io::Write, path::PathBuf};

use clap::Parser;

use kapreport::peripheral::pdf;

/// Dumps the text of a PDF exactly as kapreport sees it.
///
/// Use it to check why a statement section is not found, or to make test
/// files. Sanitize account numbers and names before committing a dump as
/// test data. kapreport accepts the dump (saved as .txt) in place of the PDF.
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
struct Args {
    /// Input file
    #[arg(required = true)]
    pub input: PathBuf,

    /// Show pretty page delimiters
    #[arg(short = 'n', long)]
    pub show_page_numbers: bool,

    /// Inserts page delimiters that kapreport strips back out.
    #[arg(short = 'm', long)]
    pub parsable_page_markers: bool,

    /// Can be provided multiple times
    #[arg(short = 'p', long = "page", value_name = "PAGE")]
    pub pages: Option<Vec<usize>>,
}

/// page_num should be one-based
fn page_marker_line(page_num: usize) -> String {
    format!("---------- Page {page_num} ----------")
}

fn main() -> Result<(), ()> {
    let args = Args::parse();

    let print_err = |e: String| eprintln!("Error: {e}");

    if !args.show_page_numbers && !args.parsable_page_markers && args.pages.is_none() {
        let text = pdf::get_doc_text(&args.input).map_err(print_err)?;
        print!("{text}");
        return Ok(());
    }

    let pages = pdf::get_pages_text(&args.input).map_err(print_err)?;
    let mut out = std::io::stdout();
    let mut has_printed = false;
    for (i, page_text) in pages.iter().enumerate() {
        let page_num = i + 1;
        if let Some(pages_to_show) = &args.pages {
            if !pages_to_show.contains(&page_num) {
                continue;
            }
        }

        if args.parsable_page_markers {
            print!("{}", pdf::parseable_page_marker(page_num));
        } else if args.show_page_numbers {
            println!(
                "{}{}",
                if !has_printed { "" } else { "\n" },
                page_marker_line(page_num)
            );
        }
        print!("{page_text}");
        let _ = out.flush();
        has_printed = true;
    }

    Ok(())
}
