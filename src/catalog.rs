//! Resource names accepted on the command line, and the lookup that maps
//! what the user typed to a store.

use crate::store::ResourceStore;
use crate::stores::{OptionKind, Stores};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
  Employees,
  Teams,
  Projects,
  Tasks,
  Attendance,
  Payroll,
  Payslips,
  Vendors,
  VendorAttachments,
  VendorTaskPivots,
  VendorTaskLists,
  VendorTaskScopes,
  VendorTaskPayments,
  OperationalCosts,
  FixedCosts,
  Files,
  LeaveRequests,
  Credentials,
  Dashboard,
  CompanyAbout,
  Option(OptionKind),
}

impl ResourceKind {
  pub fn store<'a>(&self, stores: &'a Stores) -> &'a ResourceStore {
    match self {
      ResourceKind::Employees => &stores.employees,
      ResourceKind::Teams => &stores.teams,
      ResourceKind::Projects => &stores.projects,
      ResourceKind::Tasks => &stores.tasks,
      ResourceKind::Attendance => &stores.attendance,
      ResourceKind::Payroll => &stores.payroll,
      ResourceKind::Payslips => stores.payroll.payslips(),
      ResourceKind::Vendors => &stores.vendors.vendors,
      ResourceKind::VendorAttachments => &stores.vendors.attachments,
      ResourceKind::VendorTaskPivots => &stores.vendors.task_pivots,
      ResourceKind::VendorTaskLists => &stores.vendors.task_lists,
      ResourceKind::VendorTaskScopes => &stores.vendors.task_scopes,
      ResourceKind::VendorTaskPayments => &stores.vendors.task_payments,
      ResourceKind::OperationalCosts => &stores.finance.operational,
      ResourceKind::FixedCosts => &stores.finance.fixed_costs,
      ResourceKind::Files => &stores.files,
      ResourceKind::LeaveRequests => &stores.leave_requests,
      ResourceKind::Credentials => &stores.credentials,
      ResourceKind::Dashboard => &stores.dashboard,
      ResourceKind::CompanyAbout => &stores.company_about,
      ResourceKind::Option(kind) => stores.options.store(*kind),
    }
  }
}

#[derive(Debug, Clone)]
pub struct Resource {
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
  pub kind: ResourceKind,
}

/// All known resources
pub const RESOURCES: &[Resource] = &[
  Resource {
    name: "employees",
    aliases: &["e", "emp", "employee"],
    description: "Employee records",
    kind: ResourceKind::Employees,
  },
  Resource {
    name: "teams",
    aliases: &["t", "team"],
    description: "Teams and their members",
    kind: ResourceKind::Teams,
  },
  Resource {
    name: "projects",
    aliases: &["p", "project"],
    description: "Projects",
    kind: ResourceKind::Projects,
  },
  Resource {
    name: "tasks",
    aliases: &["task", "project-tasks"],
    description: "Project tasks",
    kind: ResourceKind::Tasks,
  },
  Resource {
    name: "attendance",
    aliases: &["a", "att", "attendances"],
    description: "Your attendance records",
    kind: ResourceKind::Attendance,
  },
  Resource {
    name: "payroll",
    aliases: &["pay", "payrolls"],
    description: "Payroll runs",
    kind: ResourceKind::Payroll,
  },
  Resource {
    name: "payslips",
    aliases: &["slip", "payslip"],
    description: "Your payslips",
    kind: ResourceKind::Payslips,
  },
  Resource {
    name: "vendors",
    aliases: &["v", "vendor"],
    description: "Vendor master data",
    kind: ResourceKind::Vendors,
  },
  Resource {
    name: "vendor-attachments",
    aliases: &["attachments"],
    description: "Vendor attachments",
    kind: ResourceKind::VendorAttachments,
  },
  Resource {
    name: "vendor-task-pivots",
    aliases: &["pivots"],
    description: "Vendor task assignments",
    kind: ResourceKind::VendorTaskPivots,
  },
  Resource {
    name: "vendor-task-lists",
    aliases: &["task-lists"],
    description: "Vendor task lists",
    kind: ResourceKind::VendorTaskLists,
  },
  Resource {
    name: "vendor-task-scopes",
    aliases: &["scopes"],
    description: "Vendor task scopes",
    kind: ResourceKind::VendorTaskScopes,
  },
  Resource {
    name: "vendor-task-payments",
    aliases: &["payments"],
    description: "Vendor task payments",
    kind: ResourceKind::VendorTaskPayments,
  },
  Resource {
    name: "operational-costs",
    aliases: &["finance", "company-finances"],
    description: "Operational cost records",
    kind: ResourceKind::OperationalCosts,
  },
  Resource {
    name: "fixed-costs",
    aliases: &["fixed"],
    description: "Fixed cost sheet",
    kind: ResourceKind::FixedCosts,
  },
  Resource {
    name: "files",
    aliases: &["archives", "files-company"],
    description: "Company document archive",
    kind: ResourceKind::Files,
  },
  Resource {
    name: "leave-requests",
    aliases: &["l", "leave", "leaves"],
    description: "Your leave requests",
    kind: ResourceKind::LeaveRequests,
  },
  Resource {
    name: "credentials",
    aliases: &["c", "accounts", "credential-accounts"],
    description: "Stored credential accounts",
    kind: ResourceKind::Credentials,
  },
  Resource {
    name: "dashboard",
    aliases: &["d", "dash"],
    description: "Dashboard statistics",
    kind: ResourceKind::Dashboard,
  },
  Resource {
    name: "company-about",
    aliases: &["company", "about"],
    description: "Company profile",
    kind: ResourceKind::CompanyAbout,
  },
  Resource {
    name: "departments",
    aliases: &["dept"],
    description: "Department options",
    kind: ResourceKind::Option(OptionKind::Departments),
  },
  Resource {
    name: "employment-types",
    aliases: &["employment"],
    description: "Employment type options",
    kind: ResourceKind::Option(OptionKind::EmploymentTypes),
  },
  Resource {
    name: "job-statuses",
    aliases: &["jobs"],
    description: "Job status options",
    kind: ResourceKind::Option(OptionKind::JobStatuses),
  },
  Resource {
    name: "leave-types",
    aliases: &[],
    description: "Leave type options",
    kind: ResourceKind::Option(OptionKind::LeaveTypes),
  },
  Resource {
    name: "work-locations",
    aliases: &["locations"],
    description: "Work location options",
    kind: ResourceKind::Option(OptionKind::WorkLocations),
  },
  Resource {
    name: "skill-levels",
    aliases: &["skills"],
    description: "Skill level options",
    kind: ResourceKind::Option(OptionKind::SkillLevels),
  },
];

/// Resources matching `input`, best match first.
pub fn suggestions(input: &str) -> Vec<&'static Resource> {
  let input_lower = input.trim().to_lowercase();

  if input_lower.is_empty() {
    return RESOURCES.iter().collect();
  }

  let mut matches: Vec<(&Resource, u32)> = Vec::new();

  for res in RESOURCES {
    // Exact match on name
    if res.name == input_lower {
      matches.push((res, 0));
      continue;
    }

    if res.aliases.contains(&input_lower.as_str()) {
      matches.push((res, 1));
      continue;
    }

    if res.name.starts_with(&input_lower) {
      matches.push((res, 2));
      continue;
    }

    if res.aliases.iter().any(|a| a.starts_with(&input_lower)) {
      matches.push((res, 3));
      continue;
    }

    // Fuzzy match (contains)
    if res.name.contains(&input_lower) {
      matches.push((res, 4));
      continue;
    }

    if res.aliases.iter().any(|a| a.contains(&input_lower)) {
      matches.push((res, 5));
    }
  }

  // Stable sort keeps table order within a priority
  matches.sort_by_key(|(_, priority)| *priority);

  matches.into_iter().map(|(res, _)| res).collect()
}

/// Best match for `input`, if anything matches at all.
pub fn resolve(input: &str) -> Option<&'static Resource> {
  if input.trim().is_empty() {
    return None;
  }
  suggestions(input).into_iter().next()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_input_returns_all() {
    assert_eq!(suggestions("").len(), RESOURCES.len());
    assert!(resolve("  ").is_none());
  }

  #[test]
  fn test_exact_match() {
    assert_eq!(resolve("payroll").map(|r| r.name), Some("payroll"));
    assert_eq!(resolve("Employees").map(|r| r.name), Some("employees"));
  }

  #[test]
  fn test_alias_match() {
    assert_eq!(resolve("e").map(|r| r.name), Some("employees"));
    assert_eq!(resolve("accounts").map(|r| r.kind), Some(ResourceKind::Credentials));
  }

  #[test]
  fn test_prefix_match() {
    assert_eq!(resolve("proj").map(|r| r.name), Some("projects"));
  }

  #[test]
  fn test_fuzzy_match() {
    assert_eq!(resolve("scope").map(|r| r.name), Some("vendor-task-scopes"));
    assert!(resolve("zzz").is_none());
  }

  #[test]
  fn test_names_are_unique() {
    let mut names: Vec<_> = RESOURCES.iter().map(|r| r.name).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), RESOURCES.len());
  }

  #[test]
  fn test_kind_maps_to_store() {
    let client = crate::api::ApiClient::new(&crate::config::ApiConfig::default()).unwrap();
    let stores = Stores::new(client);
    let store = ResourceKind::Option(OptionKind::LeaveTypes).store(&stores);
    assert_eq!(store.spec().list_endpoint(), "options/leave-types");
    assert_eq!(ResourceKind::Payslips.store(&stores).spec().base, "my-payslips");
  }
}
