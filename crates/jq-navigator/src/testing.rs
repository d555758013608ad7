//! In-memory collaborators shared by the reconciler tests

use std::sync::Arc;

use jq_context::{ClauseContext, MemoryProjectResolver};
use jq_core::{FieldOption, Id, Project, SearchConfig, Version};
use jq_query::{LiteralOperandResolver, Query, TerminalClause};

use crate::field::{CustomField, FieldType};
use crate::lookups::{MemoryClauseNameResolver, MemoryGroupResolver, MemoryVersionResolver};
use crate::options::MemoryOptionLookup;
use crate::services::NavigatorServices;

pub const SELECT_FIELD: Id = 10_000;
pub const MULTI_FIELD: Id = 10_001;
pub const CASCADE_FIELD: Id = 10_002;
pub const GROUP_FIELD: Id = 10_003;
pub const PROJECT_FIELD: Id = 10_004;
pub const VERSION_FIELD: Id = 10_005;

pub struct Fixture {
    pub options: Arc<MemoryOptionLookup>,
    pub projects: Arc<MemoryProjectResolver>,
    pub versions: Arc<MemoryVersionResolver>,
    pub groups: Arc<MemoryGroupResolver>,
    pub clause_names: Arc<MemoryClauseNameResolver>,
}

impl Fixture {
    pub fn services(&self) -> NavigatorServices {
        NavigatorServices {
            operand_resolver: Arc::new(LiteralOperandResolver::new()),
            options: self.options.clone(),
            projects: self.projects.clone(),
            versions: self.versions.clone(),
            groups: self.groups.clone(),
            clause_names: self.clause_names.clone(),
            config: Arc::new(SearchConfig::default()),
        }
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Options, projects, versions and groups used across the reconciler tests
///
/// - select: Red (10), Blue (11); Green (12) in HSP only, green (13) in MKY only
/// - multi-select: alpha (100), beta (101)
/// - cascading: Hardware (20) > Keyboard (40), Mouse (41); Software (30)
/// - projects: HSP (10), MKY "Monkey" (20), APE "Monkey" (30)
/// - versions: 1.0 (55, HSP), 2.0 (56, HSP), 1.0 (57, MKY)
pub fn fixture() -> Fixture {
    init_tracing();

    let options = MemoryOptionLookup::new();
    options.add_options(
        SELECT_FIELD,
        [FieldOption::new(10, "Red"), FieldOption::new(11, "Blue")],
    );
    options.add_scoped_options(SELECT_FIELD, ClauseContext::projects([10]), [FieldOption::new(12, "Green")]);
    options.add_scoped_options(SELECT_FIELD, ClauseContext::projects([20]), [FieldOption::new(13, "green")]);
    options.add_options(
        MULTI_FIELD,
        [FieldOption::new(100, "alpha"), FieldOption::new(101, "beta")],
    );

    let hardware = FieldOption::new(20, "Hardware");
    options.add_options(
        CASCADE_FIELD,
        [
            FieldOption::child_of(40, "Keyboard", &hardware),
            FieldOption::child_of(41, "Mouse", &hardware),
            hardware,
            FieldOption::new(30, "Software"),
        ],
    );

    Fixture {
        options: Arc::new(options),
        projects: Arc::new(MemoryProjectResolver::with_projects([
            Project::new(10, "HSP", "Homosapien"),
            Project::new(20, "MKY", "Monkey"),
            Project::new(30, "APE", "Monkey"),
        ])),
        versions: Arc::new(MemoryVersionResolver::with_versions([
            Version::new(55, 10, "1.0"),
            Version::new(56, 10, "2.0"),
            Version::new(57, 20, "1.0"),
        ])),
        groups: Arc::new(MemoryGroupResolver::with_groups(["jira-developers", "jira-users"])),
        clause_names: Arc::new(MemoryClauseNameResolver::new()),
    }
}

pub fn field(id: Id, field_type: FieldType) -> CustomField {
    let name = match field_type {
        FieldType::Select => "Colour",
        FieldType::MultiSelect => "Labels",
        FieldType::Cascading => "Component",
        FieldType::Group => "Reviewers",
        FieldType::Project => "Related Project",
        FieldType::Version => "Target Version",
    };
    CustomField::new(id, name, field_type)
}

/// Query made of the given clause only
pub fn query_of(clause: Option<TerminalClause>) -> Query {
    clause.map(|c| Query::new(c.into())).unwrap_or_default()
}
