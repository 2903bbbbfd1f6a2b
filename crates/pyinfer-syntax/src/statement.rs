//! Reassembles the logical statements of a Python script from its physical lines.
//!
//! This is a heuristic over text, not a Python parser. A line that ends in an open bracket, a
//! backslash, a comma or a colon continues onto the next line. Lines that begin with a closing
//! bracket are glued back onto the statement they close.

use pyinfer_util::split::{find_unquoted, split_unquoted};

const CONTINUATION_MARKERS: &[char] = &['(', '{', '[', '\\', ',', ':'];
const CLOSING_BRACKETS: &[char] = &[')', '}', ']'];

fn strip_comment(line: &str) -> &str {
    match find_unquoted(line, '#') {
        Some(index) => &line[..index],
        None => line,
    }
}

fn is_continuing(statement: &str) -> bool {
    statement.trim_end().ends_with(CONTINUATION_MARKERS)
}

fn starts_with_closing(statement: &str) -> bool {
    statement.trim_start().starts_with(CLOSING_BRACKETS)
}

fn ends_with_closing(statement: &str) -> bool {
    statement.trim_end().ends_with(CLOSING_BRACKETS)
}

fn push_statements(statements: &mut Vec<String>, statement: &str) {
    statements.extend(
        split_unquoted(statement, ';')
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    );
}

/// Turn physical source lines into logical statements.
///
/// Comments are removed, blank lines are skipped, continued lines are joined with a single
/// space (dropping any trailing backslash), and completed statements are split on `;`.
pub fn reconstruct<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut statements: Vec<String> = vec![];
    let mut chain: Option<String> = None;

    for raw in lines {
        let line = strip_comment(raw.as_ref()).trim();
        if line.is_empty() {
            continue;
        }

        if is_continuing(line) {
            let piece = line.strip_suffix('\\').map(str::trim_end).unwrap_or(line);
            match chain.as_mut() {
                Some(c) => {
                    c.push(' ');
                    c.push_str(piece);
                }
                None => chain = Some(piece.to_string()),
            }
            continue;
        }

        match chain.take() {
            Some(mut c) => {
                c.push(' ');
                c.push_str(line);
                push_statements(&mut statements, &c);
            }
            None => match statements.last_mut() {
                // A lone closing line finishes a statement that was left hanging open
                Some(last) if ends_with_closing(line) && is_continuing(last) => last.push_str(line),
                _ => push_statements(&mut statements, line),
            },
        }
    }

    if let Some(c) = chain {
        push_statements(&mut statements, &c);
    }

    repair(statements)
}

/// Walk backwards, attaching statements that start with a closing bracket to their
/// predecessor, and statements still ending in a continuation marker to their successor.
fn repair(mut statements: Vec<String>) -> Vec<String> {
    let mut index = statements.len();
    while index > 0 {
        index -= 1;
        if is_continuing(&statements[index]) {
            if index + 1 < statements.len() {
                let follower = statements.remove(index + 1);
                statements[index].push_str(&follower);
            }
        } else if index > 0 && starts_with_closing(&statements[index]) {
            let statement = statements.remove(index);
            statements[index - 1].push_str(&statement);
        }
    }

    tracing::trace!("reconstructed {} statements", statements.len());
    statements
}

#[cfg(test)]
mod test {
    use crate::statement::reconstruct;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> Vec<String> {
        reconstruct(source.lines())
    }

    #[test]
    fn simple_statements() {
        assert_eq!(
            run("import os  # comment\n\nx = 1; y = 'a;b'\n# only a comment\n"),
            vec!["import os", "x = 1", "y = 'a;b'"]
        );
    }

    #[test]
    fn hash_inside_string_is_kept() {
        assert_eq!(run("url = 'http://x/#frag'  # c"), vec!["url = 'http://x/#frag'"]);
    }

    #[test]
    fn continued_call() {
        let source = r#"
setup(
    name="crds",
    install_requires=[
        "numpy",  # needed
        "astropy",
    ],
    zip_safe=False,
)
"#;
        assert_eq!(
            run(source),
            vec![r#"setup( name="crds", install_requires=[ "numpy", "astropy", ], zip_safe=False, )"#]
        );
    }

    #[test]
    fn backslash_continuation() {
        assert_eq!(
            run("x = 1 + \\\n    2\ny = 3"),
            vec!["x = 1 + 2", "y = 3"]
        );
    }

    #[test]
    fn closing_lines_are_reattached() {
        let source = r#"
setup(
    name="x",
    packages=find_packages(
        exclude=["tests"]
    ),
    zip_safe=False
)
"#;
        assert_eq!(
            run(source),
            vec![r#"setup( name="x", packages=find_packages( exclude=["tests"]), zip_safe=False)"#]
        );
    }

    #[test]
    fn block_headers_join_their_body() {
        assert_eq!(
            run("if __name__ == '__main__':\n    main()"),
            vec!["if __name__ == '__main__': main()"]
        );
    }

    #[test]
    fn dangling_marker_at_end_of_input() {
        assert_eq!(run("x = [\n"), vec!["x = ["]);
    }
}
