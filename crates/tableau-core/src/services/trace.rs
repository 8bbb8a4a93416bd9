use crate::models::branch::Branch;

/// Where the prover's expansion trace goes. Kept as a trait so tests can
/// capture the trace in memory instead of going through stdout, and so a
/// host can silence it entirely without threading an `Option` through the
/// search.
pub trait TraceSink {
    fn state(&mut self, depth: usize, branch: &Branch);
    fn outcome(&mut self, depth: usize, closed: bool);
}

/// Writes the trace to the process's standard output, matching the format
/// a person reading the proof by hand would expect: one indented line per
/// expansion step, then a closing `X`/`O` marker one level deeper.
pub struct StdoutTrace;

impl TraceSink for StdoutTrace {
    fn state(&mut self, depth: usize, branch: &Branch) {
        println!("{}{}", "\t".repeat(depth), render_state(branch));
    }

    fn outcome(&mut self, depth: usize, closed: bool) {
        println!("{}{}", "\t".repeat(depth), if closed { "X" } else { "O" });
    }
}

/// Discards the trace. Used when a caller only wants the verdict.
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn state(&mut self, _depth: usize, _branch: &Branch) {}
    fn outcome(&mut self, _depth: usize, _closed: bool) {}
}

/// Collects the trace into memory, one string per line, for tests and for
/// the CLI's structured JSON output mode.
#[derive(Debug, Default)]
pub struct VecTrace {
    pub lines: Vec<String>,
}

impl TraceSink for VecTrace {
    fn state(&mut self, depth: usize, branch: &Branch) {
        self.lines.push(format!("{}{}", "\t".repeat(depth), render_state(branch)));
    }

    fn outcome(&mut self, depth: usize, closed: bool) {
        self.lines.push(format!("{}{}", "\t".repeat(depth), if closed { "X" } else { "O" }));
    }
}

fn render_state(branch: &Branch) -> String {
    let formulae: Vec<String> = branch.formulae().iter().map(|sf| sf.display_string()).collect();
    format!("{{ {} }}, {{ {} }}", formulae.join(", "), branch.constants().join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::signed::SignedFormula;
    use crate::models::Formula;

    #[test]
    fn vec_trace_records_state_and_outcome() {
        let branch = Branch::from_root(SignedFormula::f(Formula::prop("A")));
        let mut sink = VecTrace::default();
        sink.state(0, &branch);
        sink.outcome(1, true);
        assert_eq!(sink.lines.len(), 2);
        assert!(sink.lines[0].contains("F (A)"));
        assert_eq!(sink.lines[1], "\tX");
    }
}
