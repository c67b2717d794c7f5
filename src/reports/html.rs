use crate::Result;
use crate::metrics::{AggregateTable, METRICS_COLUMN};
use core::fmt::Write;

/// Render the merged table as an HTML `<table>` fragment: an index column,
/// the metric-key column, and one value column per merged design.
pub fn generate_html<W: Write>(table: &AggregateTable, writer: &mut W) -> Result<()> {
    writeln!(writer, "<table border=\"1\" class=\"dataframe\">")?;
    writeln!(writer, "  <thead>")?;
    writeln!(writer, "    <tr style=\"text-align: right;\">")?;
    writeln!(writer, "      <th></th>")?;
    writeln!(writer, "      <th>{METRICS_COLUMN}</th>")?;
    for column in table.columns() {
        writeln!(writer, "      <th>{}</th>", escape(column))?;
    }
    writeln!(writer, "    </tr>")?;
    writeln!(writer, "  </thead>")?;
    writeln!(writer, "  <tbody>")?;
    for (index, (metric, cells)) in table.rows().iter().enumerate() {
        writeln!(writer, "    <tr>")?;
        writeln!(writer, "      <th>{index}</th>")?;
        writeln!(writer, "      <td>{}</td>", escape(metric))?;
        for cell in cells {
            writeln!(writer, "      <td>{}</td>", escape(cell))?;
        }
        writeln!(writer, "    </tr>")?;
    }
    writeln!(writer, "  </tbody>")?;
    writeln!(writer, "</table>")?;

    Ok(())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
