use crate::Result;
use crate::facts::Collection;
use core::fmt::Write;
use owo_colors::OwoColorize;

const MIN_NAME_WIDTH: usize = 10;

/// Write a table of the collected repositories followed by a short summary.
///
/// At most `top` repositories are listed when a limit is given; the summary always covers all of them.
pub fn generate<W: Write>(collection: &Collection, top: Option<usize>, use_colors: bool, writer: &mut W) -> Result<()> {
    let shown = &collection.repositories[..top.unwrap_or(usize::MAX).min(collection.repositories.len())];

    let name_width = shown
        .iter()
        .map(|r| r.owner.chars().count() + 1 + r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_NAME_WIDTH);

    let header = format!(
        "{:>4}  {:<name_width$}  {:>9}  {:>9}  {:>8}  {:<12}  {:>7}  {:>7}",
        "#", "Repository", "Stars", "Watchers", "Forks", "Language", "Authors", "Commits"
    );
    if use_colors {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{header}")?;
    }

    for repo in shown {
        let full_name = repo.full_name();
        let commits = repo.total_commits();
        let line = format!(
            "{:>4}  {:<name_width$}  {:>9}  {:>9}  {:>8}  {:<12}  {:>7}  {:>7}",
            repo.position,
            full_name,
            repo.stars,
            repo.watchers,
            repo.forks,
            repo.language,
            repo.authors.len(),
            commits
        );

        if use_colors && commits == 0 {
            writeln!(writer, "{}", line.dimmed())?;
        } else {
            writeln!(writer, "{line}")?;
        }
    }

    if shown.len() < collection.repositories.len() {
        writeln!(writer, "{:>4}  ... {} more", "", collection.repositories.len() - shown.len())?;
    }

    let total_commits: u64 = collection.repositories.iter().map(crate::facts::Repository::total_commits).sum();
    let active = collection.repositories.iter().filter(|r| !r.authors.is_empty()).count();

    writeln!(writer)?;
    writeln!(
        writer,
        "{} repositories, {active} with commits today, {total_commits} commit(s) in total",
        collection.repositories.len()
    )?;

    if !collection.omissions.is_empty() {
        let message = format!("{} repositories could not be summarized:", collection.omissions.len());
        if use_colors {
            writeln!(writer, "{}", message.yellow())?;
        } else {
            writeln!(writer, "{message}")?;
        }

        for omission in &collection.omissions {
            writeln!(
                writer,
                "{:>4}  {}: {}",
                omission.position,
                omission.repository.as_deref().unwrap_or("unnamed"),
                omission.reason
            )?;
        }
    }

    Ok(())
}
