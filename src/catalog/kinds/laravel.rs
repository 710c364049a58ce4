//! Laravel backend on Apache with mod_php

use super::*;

pub struct LaravelKind;

impl ContainerKind for LaravelKind {
    fn id(&self) -> ContainerKindId {
        ContainerKindId::Laravel
    }

    fn type_class(&self) -> Option<TypeClass> {
        Some(TypeClass::Backend)
    }

    fn internal_port(&self) -> u16 {
        80
    }

    fn dockerfile(&self, internal_port: u16) -> Option<String> {
        Some(format!(
            r#"FROM php:8.2-apache

RUN apt-get update && apt-get install -y \
    git \
    unzip \
    libpq-dev \
    libzip-dev \
    && docker-php-ext-install pdo pdo_pgsql pdo_mysql zip \
    && rm -rf /var/lib/apt/lists/*

RUN curl -sS https://getcomposer.org/installer | php -- --install-dir=/usr/local/bin --filename=composer

ENV APACHE_DOCUMENT_ROOT=/var/www/html/public
RUN sed -ri -e 's!/var/www/html!${{APACHE_DOCUMENT_ROOT}}!g' /etc/apache2/sites-available/*.conf \
    && sed -ri -e 's!/var/www/!${{APACHE_DOCUMENT_ROOT}}!g' /etc/apache2/apache2.conf /etc/apache2/conf-available/*.conf \
    && a2enmod rewrite

WORKDIR /var/www/html

COPY . .
RUN composer install --no-dev --optimize-autoloader --no-interaction \
    && chown -R www-data:www-data storage bootstrap/cache

EXPOSE {port}

CMD ["apache2-foreground"]
"#,
            port = internal_port
        ))
    }
}
