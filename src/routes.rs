use crate::{
    api::{catalog, console, screen},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

/// Per-IP limiter allowing `requests_per_min` with a burst of the same size.
pub fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_default();
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    let screen_limiter = Arc::new(build_limiter(config.rate_screen_per_min));
    let catalog_limiter = Arc::new(build_limiter(config.rate_catalog_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            // /session
            .service(
                web::resource("/session")
                    .wrap(catalog_limiter.clone())
                    .route(web::post().to(console::open_session))
                    .route(web::delete().to(console::close_session)),
            )
            // /months, /months/{label}
            .service(
                web::resource("/months")
                    .wrap(catalog_limiter.clone())
                    .route(web::get().to(console::list_months)),
            )
            .service(
                web::resource("/months/{label}")
                    .wrap(catalog_limiter.clone())
                    .route(web::get().to(console::month_info)),
            )
            // payroll screens
            .service(
                web::scope("/screens")
                    .wrap(screen_limiter)
                    .service(
                        web::resource("/wage-slip/attendance/{worker_id}")
                            .route(web::put().to(screen::toggle_attendance)),
                    )
                    .service(
                        web::resource("/wages/work-details")
                            .route(web::post().to(screen::apply_work_details)),
                    )
                    .service(
                        web::resource("/{kind}/select")
                            .route(web::post().to(screen::select_section)),
                    )
                    .service(web::resource("/{kind}/go").route(web::post().to(screen::go)))
                    .service(web::resource("/{kind}/rows").route(web::get().to(screen::rows)))
                    .service(
                        web::resource("/{kind}/overrides/{worker_id}")
                            .route(web::put().to(screen::set_override)),
                    )
                    .service(web::resource("/{kind}/save").route(web::post().to(screen::save)))
                    .service(web::resource("/{kind}/pdf").route(web::post().to(screen::pdf))),
            )
            // reference data
            .service(
                web::resource("/sections")
                    .wrap(catalog_limiter.clone())
                    .route(web::get().to(catalog::list_sections)),
            )
            .service(
                web::resource("/sections/{id}/jobs")
                    .wrap(catalog_limiter.clone())
                    .route(web::get().to(catalog::section_jobs)),
            )
            .service(
                web::resource("/bonus-types")
                    .wrap(catalog_limiter.clone())
                    .route(web::get().to(catalog::list_bonus_types)),
            )
            // /employees
            .service(
                web::resource("/employees")
                    .wrap(catalog_limiter.clone())
                    .route(web::get().to(catalog::list_employees))
                    .route(web::post().to(catalog::create_employee))
                    .route(web::put().to(catalog::update_employee)),
            )
            .service(
                web::resource("/employees/{id}")
                    .wrap(catalog_limiter.clone())
                    .route(web::delete().to(catalog::delete_employee)),
            )
            // /workers
            .service(
                web::resource("/workers")
                    .wrap(catalog_limiter.clone())
                    .route(web::get().to(catalog::list_workers))
                    .route(web::post().to(catalog::create_worker))
                    .route(web::put().to(catalog::update_worker)),
            )
            .service(
                web::resource("/workers/{id}")
                    .wrap(catalog_limiter.clone())
                    .route(web::delete().to(catalog::delete_worker)),
            )
            // /jobs
            .service(
                web::resource("/jobs")
                    .wrap(catalog_limiter.clone())
                    .route(web::get().to(catalog::list_jobs))
                    .route(web::post().to(catalog::create_job))
                    .route(web::put().to(catalog::update_job)),
            )
            .service(
                web::resource("/jobs/{id}")
                    .wrap(catalog_limiter.clone())
                    .route(web::delete().to(catalog::delete_job)),
            )
            // /leave-types
            .service(
                web::resource("/leave-types")
                    .wrap(catalog_limiter.clone())
                    .route(web::get().to(catalog::list_leave_types))
                    .route(web::post().to(catalog::create_leave_type))
                    .route(web::put().to(catalog::update_leave_type)),
            )
            .service(
                web::resource("/leave-types/{id}")
                    .wrap(catalog_limiter.clone())
                    .route(web::delete().to(catalog::delete_leave_type)),
            )
            // /salaries
            .service(
                web::resource("/salaries")
                    .wrap(catalog_limiter)
                    .route(web::get().to(catalog::list_salaries))
                    .route(web::put().to(catalog::update_salary)),
            ),
    );
}
