use chrono::Local;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};

use crate::StatsError;
use crate::job::JobStatus;

/// 任务进度的控制台输出
pub struct StatusReporter {
    quiet: bool,
    show_table: bool,
}

impl StatusReporter {
    pub fn new(show_table: bool) -> Self {
        Self {
            quiet: false,
            show_table,
        }
    }

    /// 不输出任何内容的报告器
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            show_table: false,
        }
    }

    pub fn print_submitted(&self, request_id: &str, message: Option<&str>) {
        if self.quiet {
            return;
        }
        if let Some(message) = message {
            println!("{}", message.green());
        }
        println!("Request Id: {}", request_id.bold());
    }

    /// 每次轮询输出一行
    pub fn print_tick(&self, attempt: u32, status: &JobStatus) {
        if self.quiet {
            return;
        }
        println!(
            " {} [{}] {}",
            Local::now().format("%H:%M:%S").to_string().dimmed(),
            attempt,
            Self::tick_line(status)
        );
    }

    fn tick_line(status: &JobStatus) -> String {
        let state = if status.is_completed {
            status.status_line().green()
        } else {
            status.status_line().yellow()
        };
        status.summary_with(state)
    }

    pub fn print_error(&self, err: &StatsError) {
        if self.quiet {
            return;
        }
        eprintln!("   {}: {}", "Error".red().bold(), err.user_message());
    }

    pub fn print_redirect(&self, uri: Option<&str>) {
        if self.quiet {
            return;
        }
        match uri {
            Some(uri) => eprintln!(
                "{} Log in again at {}",
                "Session expired.".yellow().bold(),
                uri
            ),
            None => eprintln!("{} Log in again and retry.", "Session expired.".yellow().bold()),
        }
    }

    pub fn print_status(&self, status: &JobStatus) {
        if self.quiet {
            return;
        }
        println!("{}", Self::status_table(status));
        if self.show_table && !status.table_markup.is_empty() {
            println!("\n{}", status.table_markup);
        }
    }

    pub fn status_table(status: &JobStatus) -> Table {
        let state_color = if status.is_completed {
            Color::Green
        } else {
            Color::Yellow
        };

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Request Id", "Total", "Status"]);
        table.add_row(vec![
            Cell::new(&status.request_id),
            Cell::new(status.total_display()),
            Cell::new(status.status_line()).fg(state_color),
        ]);
        table
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new(false)
    }
}
