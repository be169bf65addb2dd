//! Fetch transitions under the latest-trigger-wins policy.
//!
//! Only the most recently started attempt may change the state. Results of
//! older attempts are dropped whatever order they complete in.

use std::marker::PhantomData;

use crate::mvi::Reducer;

use super::intent::FetchIntent;
use super::state::{FetchState, FetchStatus};

pub struct FetchReducer<T>(PhantomData<T>);

impl<T: Clone + PartialEq + Send + 'static> Reducer for FetchReducer<T> {
    type State = FetchState<T>;
    type Intent = FetchIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FetchIntent::Started { attempt } => {
                if attempt <= state.attempt {
                    return state;
                }
                // A start superseding a running attempt keeps the status
                // from before the first one.
                let resume = match state.status {
                    FetchStatus::Loading => state.resume,
                    other => Some(other),
                };
                FetchState {
                    data: state.data,
                    status: FetchStatus::Loading,
                    attempt,
                    resume,
                }
            }

            FetchIntent::Succeeded { attempt, data } => {
                if attempt != state.attempt || !state.is_loading() {
                    return state;
                }
                FetchState {
                    data,
                    status: FetchStatus::Success,
                    attempt,
                    resume: None,
                }
            }

            FetchIntent::Failed { attempt, message } => {
                if attempt != state.attempt || !state.is_loading() {
                    return state;
                }
                FetchState {
                    data: state.data,
                    status: FetchStatus::Error { message },
                    attempt,
                    resume: None,
                }
            }

            FetchIntent::Abandoned { attempt } => {
                if attempt != state.attempt || !state.is_loading() {
                    return state;
                }
                FetchState {
                    data: state.data,
                    status: state.resume.unwrap_or_default(),
                    attempt,
                    resume: None,
                }
            }
        }
    }
}
