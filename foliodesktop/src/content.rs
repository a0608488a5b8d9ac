//! Résumé data and the panels that present it.
//!
//! Panels never touch the window manager. Anything that has to leave the
//! panel (opening another window, saving the résumé document) comes back
//! as a [`PanelAction`] for the desktop to carry out.

use crate::catalog::Content;
use egui::{RichText, Ui};
use foliocore::theme::{FolioColors, FolioTheme};
use foliocore::widgets::section_heading;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name the résumé is saved under.
pub const DOWNLOAD_NAME: &str = "Kayreddine_Derbali_CV.pdf";

#[derive(Debug)]
pub struct About {
    pub name: &'static str,
    pub title: &'static str,
    pub location: &'static str,
    pub summary: &'static str,
}

#[derive(Debug)]
pub struct Skills {
    pub languages: &'static [&'static str],
    pub web_frameworks: &'static [&'static str],
    pub dev_tools: &'static [&'static str],
    pub concepts: &'static [&'static str],
}

impl Skills {
    /// Category title, glyph and items, in display order.
    pub fn categories(&self) -> [(&'static str, &'static str, &'static [&'static str]); 4] {
        [
            ("Languages", "💻", self.languages),
            ("Web Frameworks", "🌐", self.web_frameworks),
            ("Dev Tools", "🛠", self.dev_tools),
            ("Concepts", "🧠", self.concepts),
        ]
    }
}

#[derive(Debug)]
pub struct Job {
    pub company: &'static str,
    pub position: &'static str,
    pub location: &'static str,
    pub year: &'static str,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct Education {
    pub institution: &'static str,
    pub degree: &'static str,
    pub year: &'static str,
    pub courses: &'static [&'static str],
}

#[derive(Debug)]
pub struct Project {
    pub name: &'static str,
    pub year: &'static str,
    pub description: &'static str,
    pub status: &'static str,
}

#[derive(Debug)]
pub struct ContactInfo {
    pub email: &'static str,
    pub linkedin: &'static str,
    pub github: &'static str,
}

#[derive(Debug)]
pub struct ResumeData {
    pub about: About,
    pub skills: Skills,
    pub experience: &'static [Job],
    pub education: Education,
    pub projects: &'static [Project],
    pub contact: ContactInfo,
}

pub static RESUME: ResumeData = ResumeData {
    about: About {
        name: "Kayreddine Derbali",
        title: "Software Engineer",
        location: "Tunisia",
        summary: "Motivated Software Engineer with expertise in full-stack development, AI, and DevOps. \
                  Specialized in building scalable web applications and data-driven solutions. Currently \
                  seeking new opportunities to contribute, grow, and tackle meaningful technical challenges.",
    },
    skills: Skills {
        languages: &["Java", "Python", "JavaScript", "TypeScript"],
        web_frameworks: &["Angular", "React", "Spring Boot", "Express.js", "Django"],
        dev_tools: &["Git", "Docker", "Kubernetes", "Jenkins", "Netlify", "Plesk", "Figma", "WordPress"],
        concepts: &["OOP", "REST", "CI/CD", "Algorithmic Trading", "LLMs", "AI/ML", "Databases"],
    },
    experience: &[
        Job {
            company: "CodeCooperation GmbH",
            position: "Software Developer Intern",
            location: "Hybrid – Tunis, Tunisia",
            year: "Feb 2024 – Jul 2024",
            description: "Developed QuantoTrade, an AI-driven trading platform built using FastAPI, LangChain, \
                          Next.js, and Spring Boot. I implemented a real-time analytics dashboard using WebSockets \
                          and Next.js, significantly improving trading visibility and responsiveness. Additionally, \
                          I designed and deployed CI/CD workflows via GitHub Actions, reducing manual deployment \
                          time by 70%. The platform also features an integrated chatbot powered by VectorDB, \
                          enhancing search efficiency and user support.",
        },
        Job {
            company: "Fiverr",
            position: "Web Developer Freelancer",
            location: "Remote",
            year: "Apr 2025",
            description: "Delivered Bitcoin Accumulator, a crypto portfolio dashboard built with the Binance API \
                          and Next.js. The application was deployed on Vercel, ensuring instant global \
                          accessibility and a seamless user experience.",
        },
        Job {
            company: "QuantoDev",
            position: "Software Developer Intern",
            location: "Remote – Riga, Latvia",
            year: "May 2024 – Sep 2024",
            description: "Integrated automated deployment pipelines using GitHub Actions to enhance delivery speed \
                          and reliability. Developed responsive user interfaces with Angular, ensuring full mobile \
                          compatibility and accessibility. Deployed applications via Netlify with zero-downtime \
                          updates, ensuring seamless production rollouts.",
        },
        Job {
            company: "Ecommerce website Help Informatique",
            position: "Web Developer Freelancer",
            location: "Remote – Sfax, Tunisia",
            year: "Apr 2024 – Aug 2024",
            description: "Developed a full-featured e-commerce platform with integrated modules for users, \
                          products, orders, and payments. Configured production hosting using Plesk and managed \
                          domain integration for seamless deployment.",
        },
        Job {
            company: "New Journey Global Consulting",
            position: "Web Developer Freelancer",
            location: "Remote – Sfax, Tunisia",
            year: "Jun 2023 – Aug 2023",
            description: "Developed a responsive travel consulting platform featuring an intuitive admin panel. \
                          Integrated a secure user registration and payment system using the Flouci API, \
                          ensuring safe and seamless transactions.",
        },
    ],
    education: Education {
        institution: "International Institute of Technology",
        degree: "Engineering Degree in Software Engineering",
        year: "2025",
        courses: &[
            "Data Science",
            "Web Development",
            "Big Data",
            "Cloud Computing & DevOps",
            "Artificial Intelligence & Machine Learning",
            "Software Architecture",
        ],
    },
    projects: &[
        Project {
            name: "Streamlit Caption App",
            year: "2025",
            description: "A web application that converts images to descriptive text using pre-trained AI \
                          models. Built with Python and deployed using Streamlit.",
            status: "✅",
        },
        Project {
            name: "Banking Management System",
            year: "2025",
            description: "A simple banking management platform with a Java Spring Boot backend and Angular \
                          frontend. Features include user account management and transaction tracking.",
            status: "✅",
        },
        Project {
            name: "University Printer Management System",
            year: "2024",
            description: "A web-based print management system designed for academic institutions, supporting \
                          roles for print agents, teachers, and administrators. Built using Java JEE, JSP, and \
                          Servlets.",
            status: "✅",
        },
        Project {
            name: "Crypto News Dashboard",
            year: "2024",
            description: "A real-time cryptocurrency visualization dashboard with interactive charts. Developed \
                          using Angular and Node.js.",
            status: "✅",
        },
    ],
    contact: ContactInfo {
        email: "kheireddinederbali@gmail.com",
        linkedin: "https://www.linkedin.com/in/derbali-khaireddine-912b88241/",
        github: "https://github.com/DERBALIKhayreddine",
    },
};

/// Requests a panel hands back to the desktop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelAction {
    Open(Content),
    DownloadResume,
}

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("résumé document not found at {0}; set FOLIO_RESUME to a PDF")]
    Missing(PathBuf),
    #[error("no download directory available")]
    NoDestination,
    #[error("could not save résumé: {0}")]
    Io(#[from] std::io::Error),
}

/// Default résumé location when neither settings nor `FOLIO_RESUME` name one.
/// Nothing is installed here; the owner drops the PDF in place.
pub fn default_document(data_dir: &Path) -> PathBuf {
    data_dir.join("cv").join("kay_cv.pdf")
}

/// Copy `source` into `dest_dir` as [`DOWNLOAD_NAME`]. Returns the new path.
pub fn download_resume(source: &Path, dest_dir: Option<&Path>) -> Result<PathBuf, DownloadError> {
    if !source.is_file() {
        return Err(DownloadError::Missing(source.to_path_buf()));
    }
    let dest_dir = dest_dir.ok_or(DownloadError::NoDestination)?;
    std::fs::create_dir_all(dest_dir)?;
    let target = dest_dir.join(DOWNLOAD_NAME);
    std::fs::copy(source, &target)?;
    tracing::info!(event = "desktop.resume.downloaded", target = %target.display());
    Ok(target)
}

// ---------------------------------------------------------------
// Panels
// ---------------------------------------------------------------

fn chips(ui: &mut Ui, items: &[&str], color: egui::Color32) {
    ui.horizontal_wrapped(|ui| {
        for item in items {
            egui::Frame::none()
                .fill(color.gamma_multiply(0.25))
                .rounding(egui::Rounding::same(10.0))
                .inner_margin(egui::Margin::symmetric(8.0, 3.0))
                .show(ui, |ui| {
                    ui.label(RichText::new(*item).small());
                });
        }
    });
}

fn year_badge(ui: &mut Ui, year: &str) {
    egui::Frame::none()
        .fill(FolioColors::ACCENT.gamma_multiply(0.3))
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(year).small().strong());
        });
}

fn avatar(ui: &mut Ui, size: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), size / 2.0, FolioColors::DESKTOP_ACCENT);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "K",
        egui::FontId::proportional(size * 0.45),
        egui::Color32::WHITE,
    );
}

/// Name and title with the round initial, used by the start menu and the
/// narrow layout as well.
pub fn identity(ui: &mut Ui, about: &About, avatar_size: f32) {
    ui.horizontal(|ui| {
        avatar(ui, avatar_size);
        ui.vertical(|ui| {
            ui.label(RichText::new(about.name).strong().size(16.0));
            ui.label(RichText::new(about.title).color(FolioColors::MUTED));
        });
    });
}

fn about_panel(ui: &mut Ui, about: &About) {
    ui.horizontal(|ui| {
        avatar(ui, 72.0);
        ui.vertical(|ui| {
            ui.label(RichText::new(about.name).heading().strong());
            ui.label(RichText::new(about.title).color(FolioColors::ACCENT));
            ui.label(RichText::new(format!("📍 {}", about.location)).color(FolioColors::MUTED));
        });
    });
    ui.add_space(12.0);
    FolioTheme::card_frame().show(ui, |ui| {
        ui.label(RichText::new("Summary").strong());
        ui.label(about.summary);
    });
}

fn skills_panel(ui: &mut Ui, skills: &Skills) {
    section_heading(ui, "🛠", "Skills & Technologies");
    for (title, icon, items) in skills.categories() {
        FolioTheme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(format!("{icon} {title}")).strong());
            chips(ui, items, FolioColors::ACCENT);
        });
        ui.add_space(6.0);
    }
}

fn job_card(ui: &mut Ui, job: &Job) {
    FolioTheme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(job.company).strong().size(15.0));
                ui.label(RichText::new(job.position).color(FolioColors::ACCENT));
                ui.label(RichText::new(format!("📍 {}", job.location)).small().color(FolioColors::MUTED));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| year_badge(ui, job.year));
        });
        ui.add_space(4.0);
        ui.label(job.description);
    });
}

fn experience_panel(ui: &mut Ui, jobs: &[Job]) {
    section_heading(ui, "💼", "Work Experience");
    for job in jobs {
        job_card(ui, job);
        ui.add_space(6.0);
    }
}

fn education_panel(ui: &mut Ui, education: &Education) {
    section_heading(ui, "🎓", "Education");
    FolioTheme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(education.institution).strong().size(15.0));
                ui.label(RichText::new(education.degree).color(FolioColors::ACCENT));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| year_badge(ui, education.year));
        });
        ui.add_space(6.0);
        ui.label(RichText::new("Key Courses").strong());
        chips(ui, education.courses, FolioColors::GOOD);
    });
}

fn project_card(ui: &mut Ui, project: &Project) {
    FolioTheme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(project.status);
            ui.label(RichText::new(project.name).strong().size(15.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| year_badge(ui, project.year));
        });
        ui.label(project.description);
    });
}

fn projects_panel(ui: &mut Ui, projects: &[Project], github: &str) -> Option<PanelAction> {
    section_heading(ui, "🚀", "Projects");
    for project in projects {
        project_card(ui, project);
        ui.add_space(6.0);
    }
    let mut action = None;
    FolioTheme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new("Interested in My Work?").strong());
        ui.label(
            "Check out my GitHub for more projects and contributions, or get in touch to discuss \
             potential collaborations!",
        );
        ui.horizontal(|ui| {
            ui.hyperlink_to("🐙 View GitHub", github);
            if ui.button("📬 Get in Touch").clicked() {
                action = Some(PanelAction::Open(Content::Contact));
            }
        });
    });
    action
}

fn contact_links(ui: &mut Ui, contact: &ContactInfo) {
    for (icon, label, text, url) in [
        ("📧", "Email", contact.email, format!("mailto:{}", contact.email)),
        ("💼", "LinkedIn", contact.linkedin, contact.linkedin.to_string()),
        ("🐙", "GitHub", contact.github, contact.github.to_string()),
    ] {
        ui.horizontal(|ui| {
            ui.label(RichText::new(icon).size(18.0));
            ui.vertical(|ui| {
                ui.label(RichText::new(label).small().color(FolioColors::MUTED));
                ui.hyperlink_to(text, url);
            });
        });
    }
}

fn download_button(ui: &mut Ui) -> bool {
    let button = egui::Button::new(RichText::new("📄 Download CV").strong())
        .fill(FolioColors::ACCENT.gamma_multiply(0.6))
        .min_size(egui::vec2(ui.available_width(), 34.0));
    ui.add(button).clicked()
}

fn contact_panel(ui: &mut Ui, contact: &ContactInfo) -> Option<PanelAction> {
    section_heading(ui, "📬", "Contact Information");
    let mut action = None;
    FolioTheme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new("Get in Touch").strong());
        contact_links(ui, contact);
    });
    ui.add_space(6.0);
    FolioTheme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new("Download Resume").strong());
        if download_button(ui) {
            action = Some(PanelAction::DownloadResume);
        }
    });
    ui.add_space(6.0);
    FolioTheme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new("Let's Connect").strong());
        ui.label(
            "I'm always interested in new opportunities and collaborations. Feel free to reach out if \
             you'd like to discuss potential projects, job opportunities, or just want to connect!",
        );
    });
    action
}

/// Draw the résumé panel for `content`. Games are hosted by the desktop and
/// draw nothing here.
pub fn show_section(ui: &mut Ui, content: Content, resume: &ResumeData) -> Option<PanelAction> {
    let mut action = None;
    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        action = section_body(ui, content, resume);
    });
    action
}

/// The section without its own scroll area, for embedding.
pub fn section_body(ui: &mut Ui, content: Content, resume: &ResumeData) -> Option<PanelAction> {
    match content {
        Content::About => about_panel(ui, &resume.about),
        Content::Skills => skills_panel(ui, &resume.skills),
        Content::Experience => experience_panel(ui, resume.experience),
        Content::Education => education_panel(ui, &resume.education),
        Content::Projects => return projects_panel(ui, resume.projects, resume.contact.github),
        Content::Contact => return contact_panel(ui, &resume.contact),
        Content::TicTacToe | Content::Snake => {}
    }
    None
}
