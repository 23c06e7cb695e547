// Service worker registration step
// Registers the background caching/offline worker once the page has loaded

use maud::{html, PreEscaped};

use super::{js_string, PageContext, RequestStep};
use crate::config::ServiceWorkerConfig;

pub struct ServiceWorker {
    enabled: bool,
    script: String,
    scope: String,
}

impl ServiceWorker {
    pub fn from_config(config: &ServiceWorkerConfig) -> Self {
        Self {
            enabled: config.enabled,
            script: config.script.clone(),
            scope: config.scope.clone(),
        }
    }
}

impl RequestStep for ServiceWorker {
    fn name(&self) -> &'static str {
        "service-worker"
    }

    fn apply(&self, ctx: &mut PageContext) {
        if !self.enabled {
            return;
        }

        let register = format!(
            "if('serviceWorker' in navigator){{\
             window.addEventListener('load',function(){{\
             navigator.serviceWorker.register({},{{scope:{}}})\
             .catch(function(err){{console.error('service worker registration failed',err);}});\
             }});}}",
            js_string(&self.script),
            js_string(&self.scope),
        );
        ctx.push_script(html! {
            script { (PreEscaped(register)) }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Query, ResolvedRoute};

    fn context() -> PageContext {
        PageContext::new(
            "/about",
            ResolvedRoute {
                page: "/about".to_string(),
                query: Query::new(),
            },
        )
    }

    #[test]
    fn test_disabled_by_default() {
        let mut ctx = context();
        ServiceWorker::from_config(&ServiceWorkerConfig::default()).apply(&mut ctx);
        assert!(ctx.scripts().is_empty());
    }

    #[test]
    fn test_registers_configured_script() {
        let config = ServiceWorkerConfig {
            enabled: true,
            script: "/offline.js".to_string(),
            scope: "/essays/".to_string(),
        };
        let mut ctx = context();
        ServiceWorker::from_config(&config).apply(&mut ctx);

        assert_eq!(ctx.scripts().len(), 1);
        let script = &ctx.scripts()[0].0;
        assert!(script.contains(r#"register("/offline.js",{scope:"/essays/"})"#));
        assert!(ctx.head().is_empty());
    }
}
