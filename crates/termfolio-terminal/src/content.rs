//! Section content for the informational commands.
//!
//! The session never builds portfolio text itself; it asks a
//! [`ContentProvider`] and renders whatever comes back unchanged.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use termfolio_types::error::{Result, TermfolioError};

use crate::commands::CommandId;

/// Supplies the rendered text for informational commands.
pub trait ContentProvider {
    /// Content for `id`, or `None` if this provider has nothing for it.
    fn render(&self, id: CommandId) -> Option<String>;
}

/// Built-in portfolio content, optionally overridden from TOML.
///
/// ```toml
/// [sections]
/// about = "..."
/// contact = "..."
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioContent {
    overrides: HashMap<CommandId, String>,
}

#[derive(Debug, Deserialize)]
struct ContentFile {
    #[serde(default)]
    sections: HashMap<String, String>,
}

impl PortfolioContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse section overrides from a TOML document.
    ///
    /// Keys must name informational commands.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: ContentFile = toml::from_str(s)?;
        let mut overrides = HashMap::new();
        for (key, text) in file.sections {
            let id = CommandId::ALL
                .into_iter()
                .find(|id| id.name() == key && id.is_informational())
                .ok_or_else(|| {
                    TermfolioError::Config(format!("unknown content section: {key}"))
                })?;
            overrides.insert(id, text);
        }
        Ok(Self { overrides })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let content = Self::from_toml_str(&text)?;
        log::info!(
            "Loaded {} content override(s) from {}",
            content.overrides.len(),
            path.display()
        );
        Ok(content)
    }
}

impl ContentProvider for PortfolioContent {
    fn render(&self, id: CommandId) -> Option<String> {
        if let Some(text) = self.overrides.get(&id) {
            return Some(text.clone());
        }
        builtin_section(id).map(str::to_string)
    }
}

fn builtin_section(id: CommandId) -> Option<&'static str> {
    let text = match id {
        CommandId::About => ABOUT,
        CommandId::Skills => SKILLS,
        CommandId::Experience => EXPERIENCE,
        CommandId::Projects => PROJECTS,
        CommandId::Contact => CONTACT,
        CommandId::Whoami => WHOAMI,
        CommandId::Ls => LS,
        CommandId::Neofetch => NEOFETCH,
        CommandId::Status => STATUS,
        CommandId::Portfolio => PORTFOLIO,
        CommandId::Welcome => WELCOME,
        _ => return None,
    };
    Some(text)
}

const ABOUT: &str = "\
ABOUT
==========================================
Role:            IT Director
Specialization:  System administration, cybersecurity, full-stack development
Location:        Addis Ababa, Ethiopia
Education:       B.Sc. Computer Science

Core competencies
  * System administration: Linux/Windows servers, networking, infrastructure
  * Cybersecurity: Wazuh, Elasticsearch, threat detection, incident response
  * Full-stack development: React, Node.js, PHP, MySQL

Ready to collaborate on your next project.";

const SKILLS: &str = "\
TECHNICAL SKILLS
==========================================
Frontend (HTML5, CSS3, JavaScript, React)         [#########-] 90%
Backend (PHP, Node.js, MySQL, API design)         [########--] 85%
System administration (Linux, Windows Server)     [#########-] 92%
Cybersecurity (Wazuh, Elasticsearch, Kibana)      [#########-] 87%
DevOps (Docker, CI/CD, automation)                [########--] 80%
CMS development (WordPress, themes, plugins)      [#########-] 88%

Also: IT strategy, project management, team leadership, cloud, data analytics.";

const EXPERIENCE: &str = "\
EXPERIENCE
==========================================
IT Director, A2Z Digital Media                          2023 - present
  * Leads the IT team and infrastructure roadmap
  * Rolled out a Wazuh/Elastic security monitoring stack

System Administrator                                    2022 - 2023
  * Ran Linux and Windows server fleets and office networking
  * Automated backups and patching

Web Developer (freelance)                               2020 - 2022
  * Built WordPress and React sites for small businesses";

const PROJECTS: &str = "\
PROJECTS
==========================================
SOC-in-a-box      Wazuh + Elasticsearch security monitoring for SMEs
Infra-as-code     Docker/CI pipelines for internal services
Media portal      PHP/MySQL content platform with custom CMS plugins
Terminal folio    This terminal-style portfolio";

const CONTACT: &str = "\
CONTACT
==========================================
Email:     hello@example.com
GitHub:    github.com/example
LinkedIn:  linkedin.com/in/example

Open to: IT consultation, system optimization, security audits, web development.";

const WHOAMI: &str = "\
visitor
You are browsing an interactive terminal portfolio.
Type 'help' to see what you can do here.";

const LS: &str = "\
about.txt  skills.txt  experience.txt  projects.txt  contact.txt
Use 'cat <section>' or type the section name directly.";

const NEOFETCH: &str = "        .--.         visitor@portfolio
       |o_o |        -----------------
       |:_/ |        OS:      PortfolioOS x86_64
      //   \\ \\       Shell:   termfolio
     (|     | )      Uptime:  always on
    /'\\_   _/`\\      Focus:   SysAdmin / Security / Web
    \\___)=(___/      Status:  available for projects";

const STATUS: &str = "\
SYSTEM STATUS
==========================================
Web services        [ ONLINE ]
Security monitoring [ ACTIVE ]
Availability        [ OPEN TO WORK ]";

const PORTFOLIO: &str = "\
QUICK OVERVIEW
==========================================
System administration | Cybersecurity | Full-stack development | IT leadership
Try: about, skills, experience, projects, contact";

const WELCOME: &str = "\
Welcome to the terminal portfolio.
Type 'help' to list commands, or press Tab to autocomplete.";
