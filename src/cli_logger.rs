use anyhow::Result;
use speedclip::ClipReport;

pub struct CliLogger {
    json: bool,
    no_color: bool,
}

impl CliLogger {
    pub fn new(json: bool, no_color: bool) -> Self {
        Self { json, no_color }
    }

    /// Writes the crop report to stderr; stdout may be carrying the document.
    pub fn print_report(&self, report: &ClipReport) -> Result<()> {
        if self.json {
            eprintln!("{}", serde_json::to_string(report)?);
            return Ok(());
        }

        let mut out = String::new();
        out.push_str(&format!(
            "{} {} {} {} {}\n",
            self.style("speedclip", "36;1"),
            self.style("start", "90"),
            report.window.start,
            self.style("end", "90"),
            report.window.end
        ));
        for row in &report.profiles {
            let kept = format!("{}/{}", row.kept_count, row.original_count);
            let kept = if row.kept_count == 0 {
                self.style(&kept, "33;1")
            } else {
                self.style(&kept, "32;1")
            };
            out.push_str(&format!(
                "{} kept {kept} [{}, {}) {} {} -> {}\n",
                self.style(&row.profile, "37;1"),
                row.start_index,
                row.end_index,
                self.style(&row.unit, "90"),
                row.start_value,
                row.end_value
            ));
        }
        out.push_str(&format!(
            "{} kept {}/{} samples in {} profile(s)",
            self.style("total", "90"),
            report.kept_samples(),
            report.original_samples(),
            report.profiles.len()
        ));
        eprintln!("{out}");
        Ok(())
    }

    pub fn print_error(&self, msg: &str) {
        if self.json {
            let out = serde_json::json!({
                "status": "error",
                "code": "error",
                "message": msg,
            });
            eprintln!("{out}");
            return;
        }
        eprintln!("{} {msg}", self.style("error", "31;1"));
    }

    fn style(&self, text: &str, ansi: &str) -> String {
        if self.no_color {
            return text.to_string();
        }
        format!("\x1b[{ansi}m{text}\x1b[0m")
    }
}
