use colored::Colorize;

use catalog_store::{Link, Workflow};
use nav_search::{DashboardSection, WorkflowBuckets};

pub fn print_favorites(favorites: &[Link]) {
    if favorites.is_empty() {
        return;
    }
    println!("{}", format!("★ 收藏 ({})", favorites.len()).yellow().bold());
    for link in favorites {
        println!("  {} {}", link.name.yellow(), link.url.dimmed());
    }
    println!();
}

pub fn print_sections(sections: &[DashboardSection], favorites: &[Link]) {
    if sections.is_empty() {
        println!("{}", "No link groups".dimmed());
        return;
    }

    for section in sections {
        let link_count: usize = section.groups.iter().map(|g| g.links.len()).sum();
        let marker = if section.expanded { "▾" } else { "▸" };
        let title = format!(
            "{} {} [{}] ({} groups, {} links)",
            marker,
            section.category.name,
            section.category.icon.resolved(),
            section.groups.len(),
            link_count
        );
        if section.dangling {
            println!("{} {}", title.red().bold(), "[missing category]".dimmed());
        } else {
            println!("{}", title.cyan().bold());
            if !section.category.description.is_empty() {
                println!("  {}", section.category.description.dimmed());
            }
        }

        if !section.expanded {
            continue;
        }

        for group in &section.groups {
            println!("  {} {}", "▪".blue(), group.category.bold());
            for link in &group.links {
                let star = if favorites.iter().any(|f| f.url == link.url) {
                    "★".yellow()
                } else {
                    " ".normal()
                };
                println!("    {} {} {}", star, link.name, link.url.dimmed());
            }
        }
        println!();
    }
}

pub fn print_workflow(workflow: &Workflow) {
    let status = match (workflow.is_temporary(), workflow.completed) {
        (true, true) => "✓".green(),
        (true, false) => "○".normal(),
        (false, _) => "↻".blue(),
    };
    println!(
        "{} {} {}",
        status,
        workflow.name.bold(),
        workflow.id.to_string().dimmed()
    );
    if !workflow.description.is_empty() {
        println!("    {}", workflow.description);
    }
    if !workflow.tags.is_empty() {
        let tags: Vec<String> = workflow.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("    {}", tags.join(" ").magenta());
    }
    for url in &workflow.urls {
        println!("    - {} {}", url.name, url.url.dimmed());
    }
}

pub fn print_workflow_buckets(buckets: &WorkflowBuckets) {
    println!("{}", format!("长期工作流 ({})", buckets.permanent.len()).cyan().bold());
    for workflow in &buckets.permanent {
        print_workflow(workflow);
    }
    println!();
    println!("{}", format!("临时工作流 ({})", buckets.temporary.len()).cyan().bold());
    for workflow in &buckets.temporary {
        print_workflow(workflow);
    }
}
