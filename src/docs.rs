use crate::api::catalog::{EmployeeList, JobList, LeaveTypeList, SalaryList, WorkerList};
use crate::api::console::{MonthInfo, MonthOption, SessionOpened};
use crate::api::screen::{
    AttendanceInput, GoRequest, OverrideInput, ScreenView, SelectSection, WorkDetails,
};
use crate::model::bonus_type::BonusType;
use crate::model::employee::Employee;
use crate::model::job::JobRef;
use crate::model::leave_type::LeaveType;
use crate::model::salary::{SalaryChange, SalaryEntry};
use crate::model::section::SectionRef;
use crate::model::worker::WorkerRecord;
use crate::model::worker_profile::WorkerProfile;
use crate::payroll::batch::{BatchReport, SaveOutcome};
use crate::payroll::calculator::{LineFigures, Totals};
use crate::payroll::overrides::OverrideField;
use crate::payroll::projector::{SortDirection, ViewQuery};
use crate::payroll::screen::{ScreenKind, ScreenRow};
use crate::session::SESSION_HEADER;
use utoipa::Modify;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payroll Console API",
        version = "1.0.0",
        description = r#"
## Payroll Console

Operator console over the remote payroll API. It keeps each operator's
screen state, previews payroll figures and pushes edited rows back.

### Screens
- **Bonus**: festival bonus per worker, keyed by bonus type and month
- **Overtime**: overtime hours paid at twice the hourly rate
- **Wage slip**: net wages and net pay, with the attendance bonus toggle
- **Wages**: monthly wages with day counts

Each screen is driven the same way: select a section, edit values,
save (one worker at a time) or print.

### Catalogs
Employees, workers, jobs, leave types and salaries are listed, filtered
and sorted here and created, updated or deleted on the remote API.

### Sessions
`POST /api/session` returns an id to send as `X-Console-Session` on every
screen request. Sessions expire after a period of inactivity.

---
Built with **Rust**, **Actix Web**, **reqwest** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::console::open_session,
        crate::api::console::close_session,
        crate::api::console::list_months,
        crate::api::console::month_info,

        crate::api::screen::select_section,
        crate::api::screen::go,
        crate::api::screen::rows,
        crate::api::screen::set_override,
        crate::api::screen::toggle_attendance,
        crate::api::screen::apply_work_details,
        crate::api::screen::save,
        crate::api::screen::pdf,

        crate::api::catalog::list_sections,
        crate::api::catalog::section_jobs,
        crate::api::catalog::list_bonus_types,
        crate::api::catalog::list_employees,
        crate::api::catalog::create_employee,
        crate::api::catalog::update_employee,
        crate::api::catalog::delete_employee,
        crate::api::catalog::list_workers,
        crate::api::catalog::create_worker,
        crate::api::catalog::update_worker,
        crate::api::catalog::delete_worker,
        crate::api::catalog::list_jobs,
        crate::api::catalog::create_job,
        crate::api::catalog::update_job,
        crate::api::catalog::delete_job,
        crate::api::catalog::list_leave_types,
        crate::api::catalog::create_leave_type,
        crate::api::catalog::update_leave_type,
        crate::api::catalog::delete_leave_type,
        crate::api::catalog::list_salaries,
        crate::api::catalog::update_salary
    ),
    components(
        schemas(
            SessionOpened,
            MonthOption,
            MonthInfo,
            ScreenKind,
            ScreenView,
            ScreenRow,
            SelectSection,
            GoRequest,
            OverrideInput,
            OverrideField,
            AttendanceInput,
            WorkDetails,
            ViewQuery,
            SortDirection,
            LineFigures,
            Totals,
            BatchReport,
            SaveOutcome,
            WorkerRecord,
            SectionRef,
            JobRef,
            BonusType,
            Employee,
            WorkerProfile,
            LeaveType,
            SalaryEntry,
            SalaryChange,
            EmployeeList,
            WorkerList,
            JobList,
            LeaveTypeList,
            SalaryList
        )
    ),
    modifiers(&SessionHeader),
    tags(
        (name = "Session", description = "Console session APIs"),
        (name = "Calendar", description = "Month picker APIs"),
        (name = "Screens", description = "Bonus, overtime, wage slip and wages screens"),
        (name = "Catalog", description = "Sections, jobs, employees, workers, leave types and salaries"),
    )
)]
pub struct ApiDoc;

/// Registers the session header as an API key scheme.
struct SessionHeader;

impl Modify for SessionHeader {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "console_session",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(SESSION_HEADER))),
        );
    }
}
