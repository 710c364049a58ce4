use super::*;

pub struct NuxtKind;

impl ContainerKind for NuxtKind {
    fn id(&self) -> ContainerKindId {
        ContainerKindId::Nuxt
    }

    fn type_class(&self) -> Option<TypeClass> {
        Some(TypeClass::Frontend)
    }

    fn internal_port(&self) -> u16 {
        3000
    }

    fn public_origin_keys(&self) -> Vec<&'static str> {
        vec!["NUXT_PUBLIC_SITE_URL"]
    }

    fn dockerfile(&self, internal_port: u16) -> Option<String> {
        Some(format!(
            r#"FROM node:20-alpine

WORKDIR /app

COPY package*.json ./
RUN npm install

COPY . .
RUN npm run build

ENV HOST=0.0.0.0
ENV PORT={port}

EXPOSE {port}

CMD ["node", ".output/server/index.mjs"]
"#,
            port = internal_port
        ))
    }
}
