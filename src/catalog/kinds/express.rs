use super::*;

pub struct ExpressKind;

impl ContainerKind for ExpressKind {
    fn id(&self) -> ContainerKindId {
        ContainerKindId::Express
    }

    fn type_class(&self) -> Option<TypeClass> {
        Some(TypeClass::Backend)
    }

    fn internal_port(&self) -> u16 {
        3000
    }

    fn dockerfile(&self, internal_port: u16) -> Option<String> {
        Some(format!(
            r#"FROM node:20-alpine

WORKDIR /app

COPY package*.json ./
RUN npm install --omit=dev

COPY . .

ENV NODE_ENV=production
ENV PORT={port}

EXPOSE {port}

CMD ["npm", "start"]
"#,
            port = internal_port
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_express_dockerfile() {
        let dockerfile = ExpressKind.dockerfile(4000).unwrap();
        assert!(dockerfile.contains("EXPOSE 4000"));
        assert!(dockerfile.contains(r#"CMD ["npm", "start"]"#));
    }
}
