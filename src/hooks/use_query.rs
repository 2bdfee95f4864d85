use std::cell::Cell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::filters::AnalysisFilters;
use crate::services::engine::{AnalysisKind, QueryEngine};

/// The query engine as provided through the component tree. Compared by
/// identity: the engine is created once at the app root.
#[derive(Clone)]
pub struct EngineHandle(pub Rc<QueryEngine>);

impl PartialEq for EngineHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Fails fast when called outside the engine provider; that is a wiring bug,
/// not a runtime condition.
#[hook]
pub fn use_engine() -> EngineHandle {
    use_context::<EngineHandle>()
        .expect("use_engine must be called inside the QueryEngine ContextProvider")
}

/// Uniform result of every data-fetching hook. While a refetch is pending
/// the previous data stays set alongside `is_loading`, so views keep their
/// last chart instead of flashing a spinner.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<Rc<T>>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> QueryState<T> {
    pub fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
            error: None,
        }
    }

    pub fn data(&self) -> Option<&Rc<T>> {
        self.data.as_ref()
    }
}

/// Shared fetch engine behind the per-view hooks: resolves through the
/// query cache whenever the filters settle on a key that is still fresh,
/// otherwise kicks off (or joins) a fetch. A consumer torn down before its
/// request resolves discards the result silently.
#[hook]
pub fn use_analysis<T>(kind: AnalysisKind, filters: &AnalysisFilters) -> QueryState<T>
where
    T: DeserializeOwned + Clone + PartialEq + 'static,
{
    let engine = use_engine();
    let state = use_state(QueryState::<T>::loading);

    {
        let state = state.clone();

        use_effect_with(filters.clone(), move |filters| {
            let filters = filters.clone();
            let aborted = Rc::new(Cell::new(false));
            let aborted_check = aborted.clone();

            state.set(QueryState {
                data: state.data.clone(),
                is_loading: true,
                error: None,
            });

            spawn_local(async move {
                let result = engine.0.analysis::<T>(kind, &filters).await;
                if aborted_check.get() {
                    return; // Consumer unmounted, discard the result.
                }

                match result {
                    Ok(data) => state.set(QueryState {
                        data: Some(data),
                        is_loading: false,
                        error: None,
                    }),
                    Err(e) => state.set(QueryState {
                        data: state.data.clone(),
                        is_loading: false,
                        error: Some(e.to_string()),
                    }),
                }
            });

            move || aborted.set(true)
        });
    }

    (*state).clone()
}
