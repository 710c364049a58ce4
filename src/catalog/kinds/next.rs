//! Next.js frontend, built as a standalone server bundle

use super::*;
use crate::patchers::NextConfigPatcher;

pub struct NextKind;

impl ContainerKind for NextKind {
    fn id(&self) -> ContainerKindId {
        ContainerKindId::Next
    }

    fn type_class(&self) -> Option<TypeClass> {
        Some(TypeClass::Frontend)
    }

    fn internal_port(&self) -> u16 {
        3000
    }

    fn public_origin_keys(&self) -> Vec<&'static str> {
        vec!["NEXTAUTH_URL"]
    }

    fn centralizes_env_at_root(&self) -> bool {
        true
    }

    fn dockerfile(&self, internal_port: u16) -> Option<String> {
        Some(format!(
            r#"FROM node:20-alpine

WORKDIR /app

COPY package*.json ./
RUN npm install

COPY . .
RUN npm run build

# The standalone bundle does not include static assets
RUN cp -r .next/static .next/standalone/.next/static \
    && if [ -d public ]; then cp -r public .next/standalone/public; fi

ENV NODE_ENV=production
ENV HOSTNAME=0.0.0.0
ENV PORT={port}

EXPOSE {port}

CMD ["node", ".next/standalone/server.js"]
"#,
            port = internal_port
        ))
    }

    fn config_patcher(&self) -> Option<Box<dyn ConfigPatcher>> {
        Some(Box::new(NextConfigPatcher))
    }
}
