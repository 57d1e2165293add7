pub(in crate::route) mod request;
pub(in crate::route) mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::loan::request::{CreateRequest, FindRequest, ReturnRequest, Transformer};
use crate::route::loan::response::{CreatedPresenter, Presenter};
use application::service::{CreateLoanService, FindLoansService, LateLoanService, ReturnLoanService};
use application::transfer::GetLateLoansDto;
use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use uuid::Uuid;

pub trait LoanRouter {
    fn route_loan(self) -> Self;
}

impl LoanRouter for Router<AppModule> {
    fn route_loan(self) -> Self {
        self.route(
            "/loans",
            get(
                |State(handler): State<AppModule>, Query(req): Query<FindRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { handler.find_loans(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(handler): State<AppModule>, Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake(req)
                        .handle(|dto| async move { handler.create_loan(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/loans/late",
            get(|State(handler): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| async move {
                        let period = handler.loan_period().clone();
                        handler.get_late_loans(GetLateLoansDto { period }).await
                    })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/loans/:id",
            patch(
                |State(handler): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<ReturnRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { handler.return_loan(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
